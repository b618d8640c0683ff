pub mod feeding;

pub use feeding::Entity as Feeding;
