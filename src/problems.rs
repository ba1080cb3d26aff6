pub mod poisson;
