mod mutation;
mod query;

pub use mutation::*;
pub use query::*;

use sea_orm::DbErr;

fn not_found(entity: &str, id: i32) -> DbErr {
    DbErr::RecordNotFound(format!("{entity} {id}"))
}
