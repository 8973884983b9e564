use fx_module::{ Lifecycle, Registry };
use crate::mock_host::MockHost ;

#[test]
fn host_translate_and_open_url() {

    let mut host = MockHost::default();
    host.strings.insert( "Filter.Blur".into(), "Weichzeichner".into() );
    let lifecycle = Lifecycle::new( host.clone(), Registry::new() );
    let services = lifecycle.services();

    assert_eq!( services.translate( "Filter.Blur", "Blur" ), "Weichzeichner" );
    assert_eq!( services.translate( "Filter.Sharpen", "Sharpen" ), "Sharpen" );

    assert!( services.open_url( "https://example.com/wiki" ));
    assert_eq!( host.record().opened_urls, vec![ "https://example.com/wiki".to_string() ]);

    let refusing = MockHost { url_opens: false, ..MockHost::default() };
    let lifecycle = Lifecycle::new( refusing.clone(), Registry::new() );
    assert!( !lifecycle.services().open_url( "https://example.com/wiki" ));
    assert!( refusing.record().opened_urls.is_empty() );

}
