mod attendance;
mod event;
mod member;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "rollcall",
    "m0001",
    vec_box![],
    vec_box![
        member::CreateTable,
        member::CreateUk1,
        event::CreateTable,
        event::CreateUk1,
        event::CreateIdx1,
        attendance::CreateTable,
        attendance::CreateUk1,
        attendance::CreateIdx1
    ]
);
