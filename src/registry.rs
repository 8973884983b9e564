//! The collection of components a module knows about.
//!
//! Component modules each expose a [`Registration`] function. A bootstrap
//! routine calls all of them into a fresh [`Registry`] before the
//! [`Lifecycle`]( crate::Lifecycle ) takes ownership of it, so nothing can
//! register once resolution has started.

use itertools::Itertools ;
use thiserror::Error ;

use crate::component::Component ;
use crate::utils::{ Merge, PartialSuccess };



/// Errors raised while registering components.
#[derive( Debug, Error, Clone, PartialEq, Eq )]
pub enum RegistryError {
    /// A component with the same name was already registered; the first one is kept.
    #[error( "Component '{0}' is already registered" )] DuplicateName( String ),
}

/// A component module's registration entry point.
pub type Registration = fn( &mut Registry ) -> Result<(), RegistryError>;

/// Insertion-ordered, append-only set of component descriptors.
///
/// ```
/// use fx_module::{ Component, Registry, RegistryError };
///
/// fn register_shaders( registry: &mut Registry ) -> Result<(), RegistryError> {
///     registry.register( Component::new( "gfx-shaders", || Ok(()), || Ok(()) ))
/// }
///
/// fn register_blur( registry: &mut Registry ) -> Result<(), RegistryError> {
///     registry.register( Component::new( "filter-blur", || Ok(()), || Ok(()) ).with_dependency( "gfx-shaders" ))
/// }
///
/// let ( registry, errors ) = Registry::bootstrap( &[ register_blur, register_shaders ]);
/// assert!( errors.is_empty() );
/// assert_eq!( registry.len(), 2 );
/// ```
#[derive( Debug, Default )]
pub struct Registry {
    components: Vec<Component>,
}

impl Registry {

    pub fn new() -> Self { Self::default() }

    /// Builds a registry by calling every registration function in order.
    ///
    /// # Partial Success
    /// A registration function that fails does not stop the others; its error
    /// is returned alongside the registry.
    pub fn bootstrap( registrations: &[Registration] ) -> PartialSuccess<Self, RegistryError> {
        registrations.iter().fold(
            ( Self::new(), Vec::new() ),
            |( mut registry, errors ), register | match register( &mut registry ) {
                Ok(()) => ( registry, errors ),
                Err( err ) => ( registry, errors.merge( err )),
            },
        )
    }

    /// Appends a component.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateName`] if the name is already taken.
    pub fn register( &mut self, component: Component ) -> Result<(), RegistryError> {
        if self.contains( component.name() ) {
            tracing::warn!( component = component.name(), "Rejected duplicate component registration" );
            return Err( RegistryError::DuplicateName( component.name().to_string() ));
        }
        self.components.push( component );
        Ok(())
    }

    /// Registers every component, collecting rejections instead of stopping at the first.
    pub fn register_all( &mut self, components: impl IntoIterator<Item = Component> ) -> PartialSuccess<(), RegistryError> {
        let ( _, errors ) = components.into_iter()
            .map(| component | self.register( component ))
            .partition_result::<Vec<_>, Vec<_>, _, _>();
        ((), errors )
    }

    /// All registered components, in registration order.
    pub fn components( &self ) -> &[Component] { &self.components }

    pub fn contains( &self, name: &str ) -> bool {
        self.components.iter().any(| component | component.name() == name )
    }

    pub fn len( &self ) -> usize { self.components.len() }
    pub fn is_empty( &self ) -> bool { self.components.is_empty() }

    pub(crate) fn into_components( self ) -> Vec<Component> { self.components }

}
