//! Module bring-up and teardown.
//!
//! [`Lifecycle`] owns everything one load/unload cycle needs: the host handle,
//! the registry, the components that initialized successfully and the optional
//! graphics helper. Loading is all-or-nothing at the stall boundary; unloading
//! is best-effort and always runs every finalizer it can.

use thiserror::Error ;

use crate::component::{ Component, ComponentInitError, ComponentFiniError };
use crate::host::{ DeviceType, GraphicsContext, Host, HostError, HostServices };
use crate::registry::Registry ;
use crate::resolver::{ self, DependencyStallError, Resolution };
use crate::utils::{ Merge, PartialResult, PartialSuccess };



/// Where a [`Lifecycle`] currently is.
#[derive( Copy, Clone, Debug, PartialEq, Eq, Hash )]
pub enum LifecycleState {
    NotStarted,
    ResolvingOrder,
    RunningInitializers,
    Ready,
    Failed,
    RunningFinalizers,
    Unloaded,
}

/// Fatal failures of [`Lifecycle::load`].
#[derive( Debug, Error )]
pub enum LoadError {
    /// No further component could be initialized while some were still pending.
    #[error( "{0}, this is a fatal error" )] Stalled( #[from] DependencyStallError ),
    /// A host service needed before the components run failed.
    #[error( "Host error: {0}" )] Host( #[from] HostError ),
    /// `load` was called on a lifecycle that already left [`LifecycleState::NotStarted`].
    #[error( "Cannot load from state {0:?}" )] InvalidState( LifecycleState ),
}

/// Drives component initialization and teardown for one module.
pub struct Lifecycle<H: Host> {
    host: H,
    version: String,
    state: LifecycleState,
    registry: Option<Registry>,
    loaded: Vec<Component>,
    graphics_helper: Option<H::GraphicsHelper>,
}

impl<H: Host> Lifecycle<H> {

    pub fn new( host: H, registry: Registry ) -> Self {
        Self {
            host,
            version: env!( "CARGO_PKG_VERSION" ).to_string(),
            state: LifecycleState::NotStarted,
            registry: Some( registry ),
            loaded: Vec::new(),
            graphics_helper: None,
        }
    }

    /// Sets the version string reported in load and unload logs.
    pub fn with_version( mut self, version: impl Into<String> ) -> Self {
        self.version = version.into();
        self
    }

    pub fn state( &self ) -> LifecycleState { self.state }
    pub fn version( &self ) -> &str { &self.version }
    pub fn host( &self ) -> &H { &self.host }
    pub fn services( &self ) -> HostServices<'_, H> { HostServices::new( &self.host ) }
    pub fn graphics_helper( &self ) -> Option<&H::GraphicsHelper> { self.graphics_helper.as_ref() }

    /// Components that initialized successfully, in initialization order.
    pub fn loaded_components( &self ) -> Vec<&str> {
        self.loaded.iter().map( Component::name ).collect()
    }

    /// Probes the graphics device, then initializes every registered component
    /// in dependency order.
    ///
    /// The device probe runs before any state change. [`LifecycleState::ResolvingOrder`]
    /// covers the dry-run ordering of the registry and
    /// [`LifecycleState::RunningInitializers`] the initializer passes themselves.
    ///
    /// Returns the initialization order together with the initializer failures
    /// that were isolated on the way. Components that did initialize before a
    /// stall stay recorded so [`unload`]( Self::unload ) can finalize them.
    ///
    /// # Errors
    /// - [`LoadError::Stalled`] if a pass resolves no component: a cycle, a
    ///   missing or failed dependency, or only failing initializers
    /// - [`LoadError::Host`] if the graphics helper can't be created
    /// - [`LoadError::InvalidState`] if this lifecycle was already loaded
    pub fn load( &mut self ) -> PartialResult<Vec<String>, LoadError, ComponentInitError> {

        let registry = match ( self.state, self.registry.take() ) {
            ( LifecycleState::NotStarted, Some( registry )) => registry,
            ( state, registry ) => {
                self.registry = registry ;
                tracing::warn!( ?state, "Ignoring repeated module load" );
                return Err(( LoadError::InvalidState( state ), Vec::with_capacity( 0 )));
            },
        };

        tracing::info!( "Loading Version {}", self.version );

        if let Err( err ) = self.acquire_graphics_helper() {
            tracing::error!( "Failed to prepare graphics device: {}", err );
            self.state = LifecycleState::Failed ;
            return Err(( err.into(), Vec::with_capacity( 0 )));
        }

        self.state = LifecycleState::ResolvingOrder ;
        match resolver::plan( registry.components() ) {
            Ok( order ) => tracing::debug!( ?order, "Planned initialization order" ),
            Err( stall ) => tracing::debug!( stalled = ?stall.components(), "Planned order stalls" ),
        }

        self.state = LifecycleState::RunningInitializers ;
        let Resolution { resolved, result, errors } = resolver::resolve( registry.into_components(), | component | {
            match component.initialize() {
                Ok(()) => {
                    tracing::info!( component = component.name(), "Component {} loaded.", component.name() );
                    Ok(())
                },
                Err( err ) => {
                    tracing::error!( component = component.name(), "Initializer threw exception: {}", err.reason );
                    Err( err )
                },
            }
        });
        self.loaded = resolved ;

        match result {
            Ok(()) => {
                self.state = LifecycleState::Ready ;
                tracing::info!( "Loaded Version {}", self.version );
                Ok(( self.loaded.iter().map(| component | component.name().to_string() ).collect(), errors ))
            },
            Err( stall ) => {
                self.state = LifecycleState::Failed ;
                tracing::error!( stalled = ?stall.components(), "{}, this is a fatal error", stall );
                Err(( stall.into(), errors ))
            },
        }

    }

    /// Finalizes every loaded component in reverse initialization order, then
    /// releases the graphics helper.
    ///
    /// A failed finalizer is logged and returned, and teardown carries on with
    /// the next component. Unloading after a failed load finalizes whatever did
    /// initialize. In any other state this is a no-op.
    pub fn unload( &mut self ) -> PartialSuccess<Vec<String>, ComponentFiniError> {

        if !matches!( self.state, LifecycleState::Ready | LifecycleState::Failed ) {
            tracing::debug!( state = ?self.state, "Nothing to unload" );
            return ( Vec::with_capacity( 0 ), Vec::with_capacity( 0 ));
        }

        tracing::info!( "Unloading Version {}", self.version );
        self.state = LifecycleState::RunningFinalizers ;

        let ( finalized, errors ) = self.loaded.drain( .. ).rev().fold(
            ( Vec::new(), Vec::new() ),
            |( finalized, errors ), component | match component.finalize() {
                Ok(()) => ( finalized.merge( component.name().to_string() ), errors ),
                Err( err ) => {
                    tracing::error!( component = component.name(), "Finalizer threw exception: {}", err.reason );
                    ( finalized, errors.merge( err ))
                },
            },
        );

        self.release_graphics_helper();
        self.state = LifecycleState::Unloaded ;
        tracing::info!( "Unloaded Version {}", self.version );

        ( finalized, errors )

    }

    fn acquire_graphics_helper( &mut self ) -> Result<(), HostError> {
        let _context = GraphicsContext::enter( &self.host );
        if self.host.device_type() == DeviceType::OpenGl {
            self.graphics_helper = Some( self.host.create_graphics_helper()? );
        }
        Ok(())
    }

    fn release_graphics_helper( &mut self ) {
        let _context = GraphicsContext::enter( &self.host );
        drop( self.graphics_helper.take() );
    }

}

impl<H: Host + std::fmt::Debug> std::fmt::Debug for Lifecycle<H> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Lifecycle" )
            .field( "host", &self.host )
            .field( "version", &self.version )
            .field( "state", &self.state )
            .field( "registry", &self.registry )
            .field( "loaded", &self.loaded_components() )
            .field( "graphics_helper", &self.graphics_helper.as_ref().map(| _ | "<helper>" ))
            .finish()
    }
}
