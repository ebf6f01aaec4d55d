//! Dart file generators.

mod enum_class_dart;
mod model_dart;
mod provider_dart;
mod query_dart;
mod view_dart;

pub use enum_class_dart::EnumClassDart;
pub use model_dart::ModelDart;
pub use provider_dart::ProviderDart;
pub use query_dart::QueryDart;
pub use view_dart::ViewDart;
