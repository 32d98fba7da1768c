pub mod optimal_bst;

// Re-export dynamic programming algorithms with descriptive names
pub use optimal_bst::{
    build_tree, clrs_instance, random_instance, solve, solve_with, DpTables, InOrder, Node,
    ObstConfig, ObstInstance, ObstSolution, OptimalTree, PreOrder, Traversal, TraversalOrder,
    Visit,
};
