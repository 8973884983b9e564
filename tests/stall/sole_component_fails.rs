use fx_module::{ Lifecycle, LifecycleState, LoadError, Module, Registry, StallCause };
use crate::fixture_components::{ Journal, failing_init, names };
use crate::mock_host::MockHost ;

#[test]
fn stall_sole_component_fails() {

    let journal = Journal::new();
    let mut registry = Registry::new();
    registry.register( failing_init( &journal, "d", &[], "boom" )).unwrap();

    let mut lifecycle = Lifecycle::new( MockHost::default(), registry );

    match lifecycle.load() {
        Err(( LoadError::Stalled( stall ), failures )) => {
            assert_eq!( failures.len(), 1 );
            assert_eq!( failures[0].reason.to_string(), "boom" );
            assert_eq!( stall.components(), vec![ "d" ]);
            assert_eq!( stall.stalled().first().cause, StallCause::InitializerFailed );
            assert!( stall.stalled().first().unmet().is_empty() );
        },
        Err(( err, _ )) => panic!( "Unexpected error: {}", err ),
        Ok( _ ) => panic!( "Expected failure" ),
    }
    assert_eq!( lifecycle.state(), LifecycleState::Failed );

    // Never retried, never finalized.
    lifecycle.unload();
    assert_eq!( journal.inits(), names( &[ "d" ]));
    assert!( journal.finis().is_empty() );

}

#[test]
fn stall_sole_component_fails_module_reports_failure() {

    let journal = Journal::new();
    let mut registry = Registry::new();
    registry.register( failing_init( &journal, "d", &[], "boom" )).unwrap();

    let mut module = Module::from_lifecycle( Lifecycle::new( MockHost::default(), registry ));
    assert!( !module.on_module_load() );

}
