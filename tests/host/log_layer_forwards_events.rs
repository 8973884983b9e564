use std::sync::Arc ;
use fx_module::{ HostLogLayer, Lifecycle, LogLevel };
use tracing_subscriber::layer::SubscriberExt ;
use crate::fixture_components::{ Journal, failing_init };
use crate::mock_host::MockHost ;

#[test]
fn host_log_layer_forwards_events() {

    let journal = Journal::new();
    let host = MockHost::default();
    let subscriber = tracing_subscriber::registry().with( HostLogLayer::new( Arc::new( host.clone() )));

    tracing::subscriber::with_default( subscriber, || {
        let mut registry = registry!( journal => [ "config" ]);
        registry.register( failing_init( &journal, "nvenc", &[], "no encoder" )).unwrap();
        let mut lifecycle = Lifecycle::new( host.clone(), registry ).with_version( "1.2.3" );
        lifecycle.load().unwrap();
        lifecycle.unload();
    });

    let record = host.record();
    let logged = | level: LogLevel, message: &str | record.logs.iter()
        .any(|( logged_level, line )| *logged_level == level && line.starts_with( message ));

    assert!( logged( LogLevel::Info, "Loading Version 1.2.3" ));
    assert!( logged( LogLevel::Info, "Component config loaded. component=config" ));
    assert!( logged( LogLevel::Error, "Initializer threw exception: no encoder" ));
    assert!( logged( LogLevel::Info, "Loaded Version 1.2.3" ));
    assert!( logged( LogLevel::Info, "Unloaded Version 1.2.3" ));

}
