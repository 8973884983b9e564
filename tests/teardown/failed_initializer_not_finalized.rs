use fx_module::{ Lifecycle, Registry };
use crate::fixture_components::{ Journal, Outcome, component, component_with, names };
use crate::mock_host::MockHost ;

#[test]
fn teardown_failed_initializer_not_finalized() {

    let journal = Journal::new();
    let mut registry = Registry::new();
    let ( _, warnings ) = registry.register_all([
        component( &journal, "core", &[] ),
        component_with( &journal, "nvidia-fx", &[ "core" ], Outcome::Panic( "driver missing" ), Outcome::Succeed ),
        component( &journal, "blur", &[ "core" ]),
    ]);
    assert_no_warnings!( warnings );

    let mut lifecycle = Lifecycle::new( MockHost::default(), registry );
    let ( order, failures ) = lifecycle.load().unwrap();
    assert_eq!( order, names( &[ "core", "blur" ]));
    assert_eq!( failures.len(), 1 );
    assert_eq!( failures[0].reason.to_string(), "panicked: driver missing" );

    lifecycle.unload();
    assert_eq!( journal.finis(), names( &[ "blur", "core" ]));

}
