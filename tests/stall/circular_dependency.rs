use fx_module::{ Lifecycle, LifecycleState, LoadError, UnmetDependency };
use crate::fixture_components::Journal ;
use crate::mock_host::MockHost ;

#[test]
fn stall_circular_dependency() {

    let journal = Journal::new();
    let registry = registry!( journal => [
        "x" <- [ "y" ],
        "y" <- [ "x" ],
    ]);

    let mut lifecycle = Lifecycle::new( MockHost::default(), registry );

    match lifecycle.load() {
        Err(( LoadError::Stalled( stall ), warnings )) => {
            assert_no_warnings!( warnings );
            assert_eq!( stall.components(), vec![ "x", "y" ]);
            let x = stall.stalled().first();
            assert_eq!( x.unmet(), &[ UnmetDependency::Unresolved( "y".into() )]);
        },
        Err(( err, _ )) => panic!( "Unexpected error: {}", err ),
        Ok( _ ) => panic!( "Expected failure" ),
    }

    assert_eq!( lifecycle.state(), LifecycleState::Failed );
    assert!( journal.calls().is_empty(), "no initializer may run inside a cycle" );

}
