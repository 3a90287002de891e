pub mod cake;
pub mod request;

pub use cake::{Cake, CakeFilter};
pub use request::{CakeRequest, FindAllRequest};
