//! Host-facing module entry points.
//!
//! The host only ever sees a boolean from [`Module::on_module_load`] and
//! nothing at all from the other entry points. Every error is logged here, and
//! panics are caught so none unwind into the host.

use std::panic::{ catch_unwind, AssertUnwindSafe };

use crate::host::Host ;
use crate::lifecycle::Lifecycle ;
use crate::registry::{ Registration, Registry };
use crate::utils::panic_message ;



/// A loadable module: its component registry plus the lifecycle driving it.
///
/// ```
/// # use std::path::PathBuf ;
/// # use fx_module::{ Component, DeviceType, Host, HostError, LogLevel, Module, Registry, RegistryError };
/// # struct NullHost ;
/// # impl Host for NullHost {
/// #     type GraphicsHelper = ();
/// #     fn device_type( &self ) -> DeviceType { DeviceType::Direct3D11 }
/// #     fn enter_graphics( &self ) {}
/// #     fn leave_graphics( &self ) {}
/// #     fn create_graphics_helper( &self ) -> Result<(), HostError> { Ok(()) }
/// #     fn module_data_path( &self ) -> Option<PathBuf> { None }
/// #     fn module_config_path( &self, _file: &str ) -> Option<PathBuf> { None }
/// #     fn open_url( &self, _url: &str ) -> bool { false }
/// #     fn localized_string( &self, _key: &str ) -> Option<String> { None }
/// #     fn log( &self, _level: LogLevel, _message: &str ) {}
/// # }
/// fn register_capture( registry: &mut Registry ) -> Result<(), RegistryError> {
///     registry.register( Component::new( "filter-capture", || Ok(()), || Ok(()) ))
/// }
///
/// let mut module = Module::new( NullHost, &[ register_capture ]);
/// assert!( module.on_module_load() );
/// module.on_module_post_load();
/// module.on_module_unload();
/// ```
pub struct Module<H: Host> {
    lifecycle: Lifecycle<H>,
}

impl<H: Host> Module<H> {

    /// Runs every registration function into a fresh registry.
    ///
    /// Rejected registrations are logged; the module still loads with the rest.
    pub fn new( host: H, registrations: &[Registration] ) -> Self {
        let ( registry, errors ) = Registry::bootstrap( registrations );
        for err in errors {
            tracing::warn!( "Component registration rejected: {}", err );
        }
        Self::from_lifecycle( Lifecycle::new( host, registry ))
    }

    pub fn from_lifecycle( lifecycle: Lifecycle<H> ) -> Self { Self { lifecycle }}

    pub fn lifecycle( &self ) -> &Lifecycle<H> { &self.lifecycle }

    /// Loads all components. Returns `false` on any fatal failure.
    pub fn on_module_load( &mut self ) -> bool {
        match catch_unwind( AssertUnwindSafe(|| self.lifecycle.load() )) {
            Ok( Ok( _ )) => true,
            Ok( Err(( err, _ ))) => {
                tracing::error!( "Unexpected exception in function 'on_module_load': {}", err );
                false
            },
            Err( payload ) => {
                tracing::error!( "Unexpected panic in function 'on_module_load': {}", panic_message( &*payload ));
                false
            },
        }
    }

    pub fn on_module_post_load( &mut self ) {
        tracing::debug!( state = ?self.lifecycle.state(), "Module post-load" );
    }

    /// Tears down all loaded components. Never fails towards the host.
    pub fn on_module_unload( &mut self ) {
        if let Err( payload ) = catch_unwind( AssertUnwindSafe(|| self.lifecycle.unload() )) {
            tracing::error!( "Unexpected panic in function 'on_module_unload': {}", panic_message( &*payload ));
        }
    }

}
