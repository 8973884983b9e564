use fx_module::{ Lifecycle, LifecycleState, LoadError, Module };
use crate::fixture_components::{ Journal, names };
use crate::mock_host::MockHost ;

#[test]
fn module_repeated_load_is_rejected() {

    let journal = Journal::new();
    let mut lifecycle = Lifecycle::new( MockHost::default(), registry!( journal => [ "a" ]));

    lifecycle.load().unwrap();
    match lifecycle.load() {
        Err(( LoadError::InvalidState( state ), warnings )) => {
            assert_no_warnings!( warnings );
            assert_eq!( state, LifecycleState::Ready );
        },
        Err(( err, _ )) => panic!( "Unexpected error: {}", err ),
        Ok( _ ) => panic!( "Expected failure" ),
    }
    assert_eq!( lifecycle.state(), LifecycleState::Ready );

    let mut module = Module::from_lifecycle( lifecycle );
    module.on_module_unload();
    assert!( !module.on_module_load() );

    assert_eq!( journal.inits(), names( &[ "a" ]));
    assert_eq!( journal.finis(), names( &[ "a" ]));

}
