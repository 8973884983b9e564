//! The services the hosting media application provides to the module.
//!
//! The host's rendering device, module paths, URL opener, localization table
//! and log sink are all reached through the [`Host`] trait. The core never
//! talks to the host directly beyond this surface.

use std::path::PathBuf ;
use thiserror::Error ;



/// Rendering backend reported by the host.
#[derive( Copy, Clone, Debug, PartialEq, Eq, Hash )]
pub enum DeviceType {
    Direct3D11,
    OpenGl,
    Unknown,
}

/// Severity levels understood by the host's log.
#[derive( Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash )]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

/// Failure inside a host service call.
#[derive( Debug, Error, Clone, PartialEq, Eq )]
pub enum HostError {
    /// The optional graphics helper could not be created for the active device.
    #[error( "Graphics helper unavailable: {0}" )] GraphicsHelperUnavailable( String ),
}

/// The host could not supply a root path.
#[derive( Debug, Error, Clone, PartialEq, Eq )]
pub enum PathResolutionError {
    #[error( "Host did not provide a module data path" )] NoDataPath,
    #[error( "Host did not provide a module config path for '{file}'" )] NoConfigPath { file: String },
}

/// The hosting application, as seen by the module.
///
/// Implemented by the glue layer that binds to the real host, and by mocks in
/// tests.
pub trait Host {

    /// Helper resource created at load when the device needs it, released at unload.
    type GraphicsHelper ;

    fn device_type( &self ) -> DeviceType ;

    /// Makes the host's graphics context current on this thread.
    ///
    /// Always paired with [`leave_graphics`]( Self::leave_graphics ) through [`GraphicsContext`].
    fn enter_graphics( &self );
    fn leave_graphics( &self );

    /// Creates the platform graphics helper; only called when
    /// [`device_type`]( Self::device_type ) is [`DeviceType::OpenGl`].
    ///
    /// # Errors
    /// Returns [`HostError::GraphicsHelperUnavailable`] if the helper can't be set up.
    fn create_graphics_helper( &self ) -> Result<Self::GraphicsHelper, HostError> ;

    fn module_data_path( &self ) -> Option<PathBuf> ;
    fn module_config_path( &self, file: &str ) -> Option<PathBuf> ;

    /// Opens `url` in the user's browser. Best-effort.
    fn open_url( &self, url: &str ) -> bool ;

    fn localized_string( &self, key: &str ) -> Option<String> ;

    /// Writes to the host log. Must never fail.
    fn log( &self, level: LogLevel, message: &str );

}

/// Scoped acquisition of the host graphics context.
///
/// The context is released when the guard drops, including when the code
/// inside the scope returns early with an error.
#[must_use = "the graphics context is released as soon as the guard is dropped"]
pub struct GraphicsContext<'h, H: Host + ?Sized> {
    host: &'h H,
}

impl<'h, H: Host + ?Sized> GraphicsContext<'h, H> {
    pub fn enter( host: &'h H ) -> Self {
        host.enter_graphics();
        Self { host }
    }
}

impl<H: Host + ?Sized> Drop for GraphicsContext<'_, H> {
    fn drop( &mut self ) {
        self.host.leave_graphics();
    }
}

/// Host helpers used by components: path resolution, URLs and translations.
#[derive( Debug )]
pub struct HostServices<'h, H: ?Sized> {
    host: &'h H,
}

impl<H: ?Sized> Clone for HostServices<'_, H> {
    fn clone( &self ) -> Self { *self }
}
impl<H: ?Sized> Copy for HostServices<'_, H> {}

impl<'h, H: Host + ?Sized> HostServices<'h, H> {

    pub fn new( host: &'h H ) -> Self { Self { host }}

    /// Resolves `file` relative to the module's data directory.
    ///
    /// # Errors
    /// Returns [`PathResolutionError::NoDataPath`] if the host has no data path for the module.
    pub fn data_file_path( &self, file: &str ) -> Result<PathBuf, PathResolutionError> {
        self.host.module_data_path()
            .map(| root | root.join( file ))
            .ok_or( PathResolutionError::NoDataPath )
    }

    /// Resolves `file` inside the module's configuration directory.
    ///
    /// # Errors
    /// Returns [`PathResolutionError::NoConfigPath`] if the host has no config path for the module.
    pub fn config_file_path( &self, file: &str ) -> Result<PathBuf, PathResolutionError> {
        self.host.module_config_path( file )
            .ok_or_else(|| PathResolutionError::NoConfigPath { file: file.to_string() })
    }

    pub fn open_url( &self, url: &str ) -> bool {
        let opened = self.host.open_url( url );
        if !opened { tracing::warn!( url, "Failed to open url" ); }
        opened
    }

    /// Looks `key` up in the host's localization table, falling back to `fallback`.
    pub fn translate( &self, key: &str, fallback: &str ) -> String {
        self.host.localized_string( key ).unwrap_or_else(|| fallback.to_string() )
    }

}
