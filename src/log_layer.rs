//! Forwards `tracing` events to the host's log.
//!
//! The module logs through `tracing` like any other crate; installing a
//! [`HostLogLayer`] makes those events show up in the host application's own
//! log file, flattened to a single line per event.

use std::sync::Arc ;
use tracing::field::{ Field, Visit };
use tracing::{ Event, Level, Subscriber };
use tracing_subscriber::layer::{ Context, Layer, SubscriberExt };
use tracing_subscriber::util::{ SubscriberInitExt, TryInitError };

use crate::host::{ Host, LogLevel };



/// A [`tracing_subscriber::Layer`] that writes every event to [`Host::log`].
pub struct HostLogLayer<H> {
    host: Arc<H>,
}

impl<H> HostLogLayer<H> {
    pub fn new( host: Arc<H> ) -> Self { Self { host }}
}

impl<H: Host + Send + Sync + 'static> HostLogLayer<H> {
    /// Installs the layer as the global default subscriber.
    ///
    /// # Errors
    /// Fails if a global subscriber was already set.
    pub fn try_init( host: Arc<H> ) -> Result<(), TryInitError> {
        tracing_subscriber::registry().with( Self::new( host )).try_init()
    }
}

impl<S, H> Layer<S> for HostLogLayer<H>
where
    S: Subscriber,
    H: Host + Send + Sync + 'static,
{
    fn on_event( &self, event: &Event<'_>, _ctx: Context<'_, S> ) {
        let mut visitor = MessageVisitor::default();
        event.record( &mut visitor );
        self.host.log( level_of( *event.metadata().level() ), &visitor.render() );
    }
}

fn level_of( level: Level ) -> LogLevel {
    match level {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Warning,
        Level::INFO => LogLevel::Info,
        _ => LogLevel::Debug,
    }
}

/// Collects the message and the remaining fields of an event.
#[derive( Default )]
struct MessageVisitor {
    message: String,
    fields: Vec<( &'static str, String )>,
}

impl MessageVisitor {
    fn render( self ) -> String {
        self.fields.into_iter().fold( self.message, | mut line, ( name, value ) | {
            if !line.is_empty() { line.push( ' ' ); }
            line.push_str( name );
            line.push( '=' );
            line.push_str( &value );
            line
        })
    }
}

impl Visit for MessageVisitor {
    fn record_str( &mut self, field: &Field, value: &str ) {
        match field.name() {
            "message" => self.message = value.to_string(),
            name => self.fields.push(( name, value.to_string() )),
        }
    }

    fn record_debug( &mut self, field: &Field, value: &dyn std::fmt::Debug ) {
        match field.name() {
            "message" => self.message = format!( "{:?}", value ),
            name => self.fields.push(( name, format!( "{:?}", value ))),
        }
    }
}



#[cfg( test )]
mod tests {

    use super::* ;

    #[test]
    fn render_appends_fields_after_message() {
        let visitor = MessageVisitor {
            message: "Component loaded".into(),
            fields: vec![( "component", "blur".into() ), ( "pass", "2".into() )],
        };
        assert_eq!( visitor.render(), "Component loaded component=blur pass=2" );
    }

    #[test]
    fn trace_and_debug_map_to_debug() {
        assert_eq!( level_of( Level::TRACE ), LogLevel::Debug );
        assert_eq!( level_of( Level::DEBUG ), LogLevel::Debug );
        assert_eq!( level_of( Level::WARN ), LogLevel::Warning );
    }

}
