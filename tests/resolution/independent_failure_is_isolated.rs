use fx_module::{ Lifecycle, LifecycleState, Registry };
use crate::fixture_components::{ Journal, component, failing_init, names };
use crate::mock_host::MockHost ;

#[test]
fn resolution_independent_failure_is_isolated() {

    let journal = Journal::new();
    let mut registry = Registry::new();
    let ( _, warnings ) = registry.register_all([
        component( &journal, "a", &[] ),
        failing_init( &journal, "spout", &[], "spout library missing" ),
        component( &journal, "b", &[ "a" ]),
    ]);
    assert_no_warnings!( warnings );

    let mut lifecycle = Lifecycle::new( MockHost::default(), registry );
    let ( order, failures ) = lifecycle.load().unwrap();

    assert_eq!( lifecycle.state(), LifecycleState::Ready );
    assert_eq!( order, names( &[ "a", "b" ]));
    assert_eq!( failures.len(), 1 );
    assert_eq!( failures[0].component, "spout" );
    assert_eq!( failures[0].reason.to_string(), "spout library missing" );

    // Attempted exactly once, never retried in a later pass.
    assert_eq!( journal.inits(), names( &[ "a", "spout", "b" ]));

    lifecycle.unload();
    assert_eq!( journal.finis(), names( &[ "b", "a" ]));

}
