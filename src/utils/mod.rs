mod amount;
pub use amount::*;

mod url;
pub use url::*;
