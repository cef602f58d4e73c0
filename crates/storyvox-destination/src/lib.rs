pub mod content_type;
pub mod dest_trait;
pub mod file_dest;
pub mod registry;

pub use content_type::{extension_for_mime, serve_content_type};
pub use dest_trait::Destination;
pub use file_dest::FileDestination;
pub use registry::DestinationRegistry;
