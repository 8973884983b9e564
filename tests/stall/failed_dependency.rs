use fx_module::{ Lifecycle, LoadError, Registry, StallCause, UnmetDependency };
use crate::fixture_components::{ Journal, component, failing_init, names };
use crate::mock_host::MockHost ;

#[test]
fn stall_failed_dependency() {

    let journal = Journal::new();
    let mut registry = Registry::new();
    let ( _, warnings ) = registry.register_all([
        failing_init( &journal, "d", &[], "device lost" ),
        component( &journal, "e", &[ "d" ]),
    ]);
    assert_no_warnings!( warnings );

    let mut lifecycle = Lifecycle::new( MockHost::default(), registry );

    match lifecycle.load() {
        Err(( LoadError::Stalled( stall ), failures )) => {
            assert_eq!( failures.len(), 1 );
            assert_eq!( failures[0].component, "d" );
            assert_eq!( stall.components(), vec![ "d", "e" ]);
            assert_eq!( stall.stalled().first().cause, StallCause::InitializerFailed );
            assert_eq!( stall.stalled()[1].unmet(), &[ UnmetDependency::Failed( "d".into() )]);
        },
        Err(( err, _ )) => panic!( "Unexpected error: {}", err ),
        Ok( _ ) => panic!( "Expected failure" ),
    }

    assert!( lifecycle.loaded_components().is_empty() );

    let ( finalized, warnings ) = lifecycle.unload();
    assert_no_warnings!( warnings );
    assert!( finalized.is_empty() );
    assert_eq!( journal.inits(), names( &[ "d" ]));
    assert!( journal.finis().is_empty(), "a component that failed to initialize is never finalized" );

}
