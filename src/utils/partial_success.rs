//! Result shapes for operations that keep going past individual failures.
//!
//! Loading and unloading a module never stop at the first broken component.
//! The failures they isolate travel next to the main value instead.

/// The operation completed; `Vec<E>` lists the parts that failed along the way.
pub type PartialSuccess<T, E> = ( T, Vec<E> );

/// The operation may still fail as a whole.
/// Either way, the isolated failures `W` collected up to that point come with it.
pub type PartialResult<T, E, W> = Result<( T, Vec<W> ), ( E, Vec<W> )>;
