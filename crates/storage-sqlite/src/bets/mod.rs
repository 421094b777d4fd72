mod model;
mod repository;

pub use model::BetDB;
pub use repository::BetRepository;
