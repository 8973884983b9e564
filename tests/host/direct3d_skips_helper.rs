use fx_module::Lifecycle ;
use crate::fixture_components::Journal ;
use crate::mock_host::MockHost ;

#[test]
fn host_direct3d_skips_helper() {

    let journal = Journal::new();
    let host = MockHost::default();
    let mut lifecycle = Lifecycle::new( host.clone(), registry!( journal => [ "d3d-filter" ]));

    lifecycle.load().unwrap();
    assert!( lifecycle.graphics_helper().is_none() );
    lifecycle.unload();

    let record = host.record();
    assert_eq!( record.helpers_created, 0 );
    assert_eq!( record.helpers_dropped, 0 );
    assert_eq!( record.graphics_depth, 0 );

}
