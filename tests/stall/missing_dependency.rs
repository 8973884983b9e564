use fx_module::{ Lifecycle, LoadError, UnmetDependency };
use crate::fixture_components::{ Journal, names };
use crate::mock_host::MockHost ;

#[test]
fn stall_missing_dependency() {

    let journal = Journal::new();
    let registry = registry!( journal => [
        "z" <- [ "missing" ],
        "independent",
    ]);

    let mut lifecycle = Lifecycle::new( MockHost::default(), registry );

    match lifecycle.load() {
        Err(( LoadError::Stalled( stall ), warnings )) => {
            assert_no_warnings!( warnings );
            assert_eq!( stall.components(), vec![ "z" ]);
            assert_eq!( stall.stalled().first().unmet(), &[ UnmetDependency::Missing( "missing".into() )]);
            assert_eq!( stall.to_string(), "Loading components stalled: 'z' waits on missing 'missing'" );
        },
        Err(( err, _ )) => panic!( "Unexpected error: {}", err ),
        Ok( _ ) => panic!( "Expected failure" ),
    }

    // The first pass still ran everything it could before the stall.
    assert_eq!( journal.inits(), names( &[ "independent" ]));

}
