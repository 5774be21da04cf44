mod address;
mod request;
mod status;

pub use address::ApplicationAddress;
pub use request::RequestDescriptor;
pub use status::StatusCheck;
