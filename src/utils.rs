mod partial_success ;

pub use partial_success::{ PartialSuccess, PartialResult };



/// Appends to a collection by value so accumulators can be threaded through folds.
pub trait Merge<T> {
    fn merge( self, item: T ) -> Self ;
}

impl<T> Merge<T> for Vec<T> {
    fn merge( mut self, item: T ) -> Self {
        self.push( item );
        self
    }
}

/// Extracts the message from a panic payload.
pub(crate) fn panic_message( payload: &( dyn std::any::Any + Send )) -> String {
    match payload.downcast_ref::<&'static str>() {
        Some( message ) => ( *message ).to_string(),
        None => match payload.downcast_ref::<String>() {
            Some( message ) => message.clone(),
            None => "unknown panic".to_string(),
        },
    }
}
