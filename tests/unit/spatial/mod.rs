pub mod discretize;
