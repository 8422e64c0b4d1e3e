pub mod api {
    pub mod articles;
    pub mod errors;
    pub mod options;
    pub mod pages;
    pub mod subscribers;
}
pub mod auth {
    pub mod gate;
    pub mod session;
}
pub mod db {
    pub mod article_repository;
    pub mod models;
    pub mod option_repository;
    pub mod subscriber_repository;
}
pub mod error;
pub mod routes;
pub mod seeder;
pub mod state;
