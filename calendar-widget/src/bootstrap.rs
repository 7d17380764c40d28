use std::fmt::Debug;

use log::{debug, info};

use crate::{ConfigError, WidgetConfig};

/// Identifier of the element the calendar widget is mounted into.
pub const CONTAINER_ID: &str = "calendar";

/// The environment a calendar widget is constructed in: somewhere to find
/// container elements and a constructor to hand them to.
pub trait WidgetHost {
    type Container: Debug;
    type Handle: Debug;
    type Error: std::error::Error + 'static;

    fn container(&self, id: &str) -> Option<Self::Container>;

    /// Name of the widget constructor, for diagnostics.
    fn constructor(&self) -> &str;

    fn construct(
        &self,
        container: Self::Container,
        config: &WidgetConfig,
    ) -> Result<Self::Handle, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError<E: std::error::Error + 'static> {
    #[error("invalid widget configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("no container element with id `{0}`")]
    MissingContainer(String),
    #[error("widget constructor failed: {0}")]
    Construct(#[source] E),
}

/// Constructs the calendar widget once, inside the container `container_id`.
pub fn bootstrap<H: WidgetHost>(
    host: &H,
    container_id: &str,
    config: &WidgetConfig,
) -> Result<H::Handle, BootstrapError<H::Error>> {
    config.validate()?;

    let container = host
        .container(container_id)
        .ok_or_else(|| BootstrapError::MissingContainer(container_id.to_string()))?;
    debug!("Found widget container {container:?}");

    let handle = host
        .construct(container, config)
        .map_err(BootstrapError::Construct)?;

    info!("Constructed calendar widget in #{container_id}");
    debug!("Widget constructor: {}", host.constructor());
    debug!("Widget handle: {handle:?}");

    Ok(handle)
}
