//! Component descriptors.
//!
//! A component is a self-contained unit of module functionality: a filter
//! factory, a shared graphics resource, a settings page. Each one declares the
//! names of the components it needs and provides an initializer and a finalizer.
//! Descriptors are built once, handed to the [`Registry`]( crate::Registry ) and
//! never mutated afterwards.

use std::collections::BTreeSet ;
use std::panic::{ catch_unwind, AssertUnwindSafe };
use thiserror::Error ;

use crate::utils::panic_message ;



/// Error type returned by component initializers and finalizers.
pub type ComponentFailure = Box<dyn std::error::Error + Send + Sync>;

/// A nullary, fallible component callback.
pub type ComponentFn = Box<dyn Fn() -> Result<(), ComponentFailure> + Send + Sync>;

/// Tie-break applied among components that become ready in the same pass.
///
/// Lower values run first. Priority never lets a component run before its
/// dependencies.
#[derive( Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash )]
pub enum LoaderPriority {
    Highest,
    High,
    #[default] Default,
    Low,
    Lowest,
}

/// An initializer failed; the component stays unresolved.
#[derive( Debug, Error )]
#[error( "Initializer of '{component}' failed: {reason}" )]
pub struct ComponentInitError {
    pub component: String,
    #[source] pub reason: ComponentFailure,
}

/// A finalizer failed; teardown of the remaining components continues.
#[derive( Debug, Error )]
#[error( "Finalizer of '{component}' failed: {reason}" )]
pub struct ComponentFiniError {
    pub component: String,
    #[source] pub reason: ComponentFailure,
}

/// A component callback panicked instead of returning an error.
#[derive( Debug, Error )]
#[error( "panicked: {0}" )]
pub struct ComponentPanic( pub String );

/// Immutable description of a component.
///
/// ```
/// use fx_module::{ Component, LoaderPriority };
///
/// let component = Component::new( "filter-blur", || Ok(()), || Ok(()) )
///     .with_dependencies([ "gfx-shaders", "gfx-textures" ])
///     .with_priority( LoaderPriority::Low );
///
/// assert_eq!( component.name(), "filter-blur" );
/// assert!( component.depends_on( "gfx-shaders" ));
/// ```
pub struct Component {
    name: String,
    dependencies: BTreeSet<String>,
    priority: LoaderPriority,
    initializer: ComponentFn,
    finalizer: ComponentFn,
}

impl Component {

    /// Creates a component with no dependencies and [`LoaderPriority::Default`].
    pub fn new<I, F>( name: impl Into<String>, initializer: I, finalizer: F ) -> Self
    where
        I: Fn() -> Result<(), ComponentFailure> + Send + Sync + 'static,
        F: Fn() -> Result<(), ComponentFailure> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            dependencies: BTreeSet::new(),
            priority: LoaderPriority::default(),
            initializer: Box::new( initializer ),
            finalizer: Box::new( finalizer ),
        }
    }

    /// Adds the named components to the dependency set.
    ///
    /// Names are not validated here; a dependency on a name that never
    /// registers is reported as a stall when the module loads.
    pub fn with_dependencies<S: Into<String>>( mut self, dependencies: impl IntoIterator<Item = S> ) -> Self {
        self.dependencies.extend( dependencies.into_iter().map( Into::into ));
        self
    }

    pub fn with_dependency( self, dependency: impl Into<String> ) -> Self {
        self.with_dependencies([ dependency ])
    }

    pub fn with_priority( mut self, priority: LoaderPriority ) -> Self {
        self.priority = priority ;
        self
    }

    pub fn name( &self ) -> &str { &self.name }
    pub fn dependencies( &self ) -> &BTreeSet<String> { &self.dependencies }
    pub fn priority( &self ) -> LoaderPriority { self.priority }

    pub fn depends_on( &self, name: &str ) -> bool {
        self.dependencies.contains( name )
    }

    /// Runs the initializer, converting both returned errors and panics.
    pub(crate) fn initialize( &self ) -> Result<(), ComponentInitError> {
        Self::invoke( &self.initializer ).map_err(| reason | ComponentInitError {
            component: self.name.clone(),
            reason,
        })
    }

    /// Runs the finalizer, converting both returned errors and panics.
    pub(crate) fn finalize( &self ) -> Result<(), ComponentFiniError> {
        Self::invoke( &self.finalizer ).map_err(| reason | ComponentFiniError {
            component: self.name.clone(),
            reason,
        })
    }

    fn invoke( callback: &ComponentFn ) -> Result<(), ComponentFailure> {
        match catch_unwind( AssertUnwindSafe(|| callback() )) {
            Ok( result ) => result,
            Err( payload ) => Err( Box::new( ComponentPanic( panic_message( &*payload )))),
        }
    }

}

impl AsRef<Component> for Component {
    fn as_ref( &self ) -> &Component { self }
}

impl std::fmt::Debug for Component {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Component" )
            .field( "name", &self.name )
            .field( "dependencies", &self.dependencies )
            .field( "priority", &self.priority )
            .field( "initializer", &"<closure>" )
            .field( "finalizer", &"<closure>" )
            .finish()
    }
}



#[cfg( test )]
mod tests {

    use super::* ;

    #[test]
    fn priority_orders_highest_first() {
        let mut priorities = vec![ LoaderPriority::Lowest, LoaderPriority::Default, LoaderPriority::Highest, LoaderPriority::High, LoaderPriority::Low ];
        priorities.sort();
        assert_eq!( priorities, vec![
            LoaderPriority::Highest,
            LoaderPriority::High,
            LoaderPriority::Default,
            LoaderPriority::Low,
            LoaderPriority::Lowest,
        ]);
    }

    #[test]
    fn dependencies_are_deduplicated() {
        let component = Component::new( "a", || Ok(()), || Ok(()) )
            .with_dependency( "b" )
            .with_dependencies([ "b", "c" ]);
        assert_eq!( component.dependencies().len(), 2 );
        assert!( component.depends_on( "c" ));
    }

    #[test]
    fn initializer_panic_becomes_init_error() {
        let component = Component::new( "boom", || panic!( "no device" ), || Ok(()) );
        let err = component.initialize().unwrap_err();
        assert_eq!( err.component, "boom" );
        assert_eq!( err.reason.to_string(), "panicked: no device" );
    }

    #[test]
    fn finalizer_error_names_component() {
        let component = Component::new( "leaky", || Ok(()), || Err( "handle still open".into() ));
        let err = component.finalize().unwrap_err();
        assert_eq!( err.to_string(), "Finalizer of 'leaky' failed: handle still open" );
    }

}
