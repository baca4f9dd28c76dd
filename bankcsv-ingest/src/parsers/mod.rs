pub mod absa;
