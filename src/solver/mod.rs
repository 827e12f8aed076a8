pub mod annealing;
