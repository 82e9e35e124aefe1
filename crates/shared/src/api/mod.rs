mod payloads;
pub use payloads::*;

mod response;
pub use response::*;
