//! Dependency-ordered component loading for media host plugin modules.
//!
//! A plugin module is made of independent **components**: effect filters,
//! shared graphics resources, settings pages. Each component declares the
//! components it depends on and provides an initializer and a finalizer.
//! `fx_module` brings them up in dependency order when the host loads the
//! module and tears them down in exact reverse when it unloads.
//!
//! # Core Concepts
//!
//! - [`Component`]: An immutable descriptor. It carries a unique name, a set of
//! 	dependency names, a [`LoaderPriority`] and two fallible callbacks.
//!
//! - [`Registry`]: The append-only, insertion-ordered collection of components.
//! 	Each component module exposes a [`Registration`] function, and
//! 	[`Registry::bootstrap`] calls them all before anything runs.
//!
//! - [`resolve`] / [`plan`]: The scheduler. It sorts components by priority once,
//! 	then makes repeated readiness passes, running everything whose dependencies
//! 	already succeeded. A pass that resolves nothing is a **stall**
//! 	([`DependencyStallError`]). Stalls are fatal.
//!
//! - [`Lifecycle`]: The driver. Load probes the graphics device, runs the
//! 	initializers and records the ones that succeed. Unload runs their finalizers
//! 	in reverse.
//!
//! - [`Module`]: The host-facing entry points. Errors and panics become a
//! 	`bool` and a log line.
//!
//! - [`Host`]: Everything the module needs from the hosting application. That
//! 	covers the graphics device, data and config paths, URLs, translations and
//! 	the log.
//!
//! # Failure Isolation
//!
//! A failing initializer is logged, left out of the resolved set and never
//! retried. The load only fails if a pass ends up resolving nothing, either
//! because the failure blocks its dependents or because every initializer that
//! pass ran failed.
//! A failing finalizer is logged and teardown continues. Panics inside either
//! callback are caught and treated as failures.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf ;
//! use std::sync::{ Arc, Mutex };
//! use fx_module::{
//! 	Component, DeviceType, Host, HostError, Lifecycle, LogLevel, Registry,
//! };
//!
//! struct Obs ;
//! impl Host for Obs {
//! 	type GraphicsHelper = ();
//! 	fn device_type( &self ) -> DeviceType { DeviceType::Direct3D11 }
//! 	fn enter_graphics( &self ) {}
//! 	fn leave_graphics( &self ) {}
//! 	fn create_graphics_helper( &self ) -> Result<(), HostError> { Ok(()) }
//! 	fn module_data_path( &self ) -> Option<PathBuf> { Some( PathBuf::from( "/data/fx" )) }
//! 	fn module_config_path( &self, file: &str ) -> Option<PathBuf> { Some( PathBuf::from( "/config/fx" ).join( file )) }
//! 	fn open_url( &self, _url: &str ) -> bool { true }
//! 	fn localized_string( &self, _key: &str ) -> Option<String> { None }
//! 	fn log( &self, _level: LogLevel, _message: &str ) {}
//! }
//!
//! let journal = Arc::new( Mutex::new( Vec::new() ));
//! let step = | entry: &'static str | {
//! 	let journal = Arc::clone( &journal );
//! 	move || { journal.lock().unwrap().push( entry ); Ok(()) }
//! };
//!
//! // Registration order doesn't matter, dependencies do.
//! let mut registry = Registry::new();
//! registry.register( Component::new( "filter-blur", step( "init blur" ), step( "fini blur" ))
//! 	.with_dependency( "gfx-shaders" ))?;
//! registry.register( Component::new( "gfx-shaders", step( "init shaders" ), step( "fini shaders" )))?;
//!
//! let mut lifecycle = Lifecycle::new( Obs, registry );
//! let ( order, failures ) = lifecycle.load().map_err(|( err, _ )| err )?;
//! assert_eq!( order, vec![ "gfx-shaders", "filter-blur" ]);
//! assert!( failures.is_empty() );
//!
//! lifecycle.unload();
//! assert_eq!( *journal.lock().unwrap(), vec![ "init shaders", "init blur", "fini blur", "fini shaders" ]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod component ;
mod registry ;
mod resolver ;
mod lifecycle ;
mod host ;
mod log_layer ;
mod module ;
mod utils ;

pub use component::{ Component, ComponentFailure, ComponentFn, ComponentInitError, ComponentFiniError, ComponentPanic, LoaderPriority };
pub use registry::{ Registry, RegistryError, Registration };
pub use resolver::{ resolve, plan, Resolution, DependencyStallError, StalledComponent, StallCause, UnmetDependency };
pub use lifecycle::{ Lifecycle, LifecycleState, LoadError };
pub use host::{ Host, HostServices, GraphicsContext, DeviceType, LogLevel, HostError, PathResolutionError };
pub use log_layer::HostLogLayer ;
pub use module::Module ;
pub use utils::{ PartialSuccess, PartialResult };
