pub mod phylogeny;
