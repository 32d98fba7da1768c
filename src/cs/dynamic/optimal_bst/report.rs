//! Plain-text dumps of a solved instance: the key array, the three DP tables
//! and an optional traversal listing.

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use super::{ObstSolution, OptimalTree, TraversalOrder};
use crate::error::Result;

const RULE: &str = "-------------------------------";
const NODE_RULE: &str = "-----------------------------------------------";

/// Full report: timing header, tables and, if requested, a traversal.
pub fn write_report<W, K>(
    out: &mut W,
    solution: &ObstSolution<K>,
    traversal: Option<TraversalOrder>,
) -> io::Result<()>
where
    W: Write,
    K: Display,
{
    writeln!(
        out,
        "\nOptimal Binary Search Tree Execution Time for n = {} keys",
        solution.keys().len()
    )?;
    writeln!(out, "{RULE}{RULE}")?;
    writeln!(out, "{} nanoseconds", solution.elapsed().as_nanos())?;
    writeln!(out, "expected search cost: {:.6}", solution.expected_cost())?;

    write_tables(out, solution)?;
    if let Some(order) = traversal {
        write_traversal(out, solution.tree(), order)?;
    }
    Ok(())
}

/// Key array, cost and weight tables (3 decimals) and root table.
///
/// Cells outside `a <= b` print as `-`, as do root cells of empty ranges.
pub fn write_tables<W, K>(out: &mut W, solution: &ObstSolution<K>) -> io::Result<()>
where
    W: Write,
    K: Display,
{
    writeln!(out, "\nKEY ARRAY\n{RULE}")?;
    for key in solution.keys() {
        write!(out, "{key:>10}, ")?;
    }
    writeln!(out, "\n")?;

    let tables = solution.tables();
    let size = tables.len() + 1;

    writeln!(out, "\nCOST MATRIX\n{RULE}")?;
    for a in 0..size {
        for b in 0..size {
            if a <= b {
                write!(out, "{:>10.3}", tables.cost(a, b))?;
            } else {
                write!(out, "{:>10}", "-")?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "\nWEIGHT MATRIX\n{RULE}")?;
    for a in 0..size {
        for b in 0..size {
            if a <= b {
                write!(out, "{:>10.3}", tables.weight(a, b))?;
            } else {
                write!(out, "{:>10}", "-")?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "\nROOT MATRIX\n{RULE}")?;
    for a in 0..size {
        for b in 0..size {
            match tables.root(a, b) {
                Some(r) => write!(out, "{r:>5}")?,
                None => write!(out, "{:>5}", "-")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// One block per visited node naming its children, `NULL` for a gap.
pub fn write_traversal<W, K>(
    out: &mut W,
    tree: &OptimalTree<K>,
    order: TraversalOrder,
) -> io::Result<()>
where
    W: Write,
    K: Display,
{
    writeln!(out, "\nBeginning {order} Traversal\n{RULE}----")?;
    for visit in tree.traverse(order) {
        writeln!(out, "\nCurrent Node is {}\n{NODE_RULE}\n", visit.key)?;
        match visit.left {
            Some(left) => writeln!(out, "\tleft child of {} is {}", visit.key, left)?,
            None => writeln!(out, "\tleft child of {} is NULL", visit.key)?,
        }
        match visit.right {
            Some(right) => writeln!(out, "\tright child of {} is {}", visit.key, right)?,
            None => writeln!(out, "\tright child of {} is NULL", visit.key)?,
        }
    }
    writeln!(out, "\nEnd of {order} Traversal\n")
}

/// Appends [`write_report`] output to `path`, creating the file if needed.
pub fn append_report<P, K>(
    path: P,
    solution: &ObstSolution<K>,
    traversal: Option<TraversalOrder>,
) -> Result<()>
where
    P: AsRef<Path>,
    K: Display,
{
    let path = path.as_ref();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = BufWriter::new(file);
    write_report(&mut out, solution, traversal)?;
    out.flush()?;
    info!(
        "appended report for {} keys to {}",
        solution.keys().len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::dynamic::optimal_bst::clrs_instance;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_tables_layout() {
        let obst = clrs_instance().solve().unwrap();
        let text = render(|out| write_tables(out, &obst));

        assert!(text.contains("KEY ARRAY"));
        assert!(text.contains("         1,          2,"));
        assert!(text.contains("COST MATRIX"));
        assert!(text.contains("     2.750"));
        assert!(text.contains("WEIGHT MATRIX"));
        assert!(text.contains("     1.000"));
        assert!(text.contains("ROOT MATRIX"));

        let root_rows: Vec<&str> = text
            .split("ROOT MATRIX")
            .nth(1)
            .unwrap()
            .lines()
            .skip(2)
            .take(6)
            .collect();
        assert_eq!(root_rows[0], "    -    0    0    1    1    1");
        assert_eq!(root_rows[5], "    -    -    -    -    -    -");
    }

    #[test]
    fn test_pre_order_listing() {
        let obst = clrs_instance().solve().unwrap();
        let text = render(|out| write_traversal(out, obst.tree(), TraversalOrder::PreOrder));

        assert!(text.starts_with("\nBeginning Preorder Traversal\n"));
        assert!(text.trim_end().ends_with("End of Preorder Traversal"));
        let visited: Vec<&str> = text
            .lines()
            .filter_map(|line| line.strip_prefix("Current Node is "))
            .collect();
        assert_eq!(visited, vec!["2", "1", "5", "4", "3"]);
        assert!(text.contains("\tleft child of 2 is 1\n"));
        assert!(text.contains("\tright child of 5 is NULL\n"));
    }

    #[test]
    fn test_in_order_listing() {
        let obst = clrs_instance().solve().unwrap();
        let text = render(|out| write_traversal(out, obst.tree(), TraversalOrder::InOrder));
        let visited: Vec<&str> = text
            .lines()
            .filter_map(|line| line.strip_prefix("Current Node is "))
            .collect();
        assert_eq!(visited, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_full_report() {
        let obst = clrs_instance().solve().unwrap();
        let text = render(|out| write_report(out, &obst, None));
        assert!(text.contains("Execution Time for n = 5 keys"));
        assert!(text.contains("nanoseconds"));
        assert!(text.contains("expected search cost: 2.750000"));
        assert!(!text.contains("Traversal"));
    }

    #[test]
    fn test_append_report_keeps_previous_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obst.log");
        let obst = clrs_instance().solve().unwrap();

        append_report(&path, &obst, Some(TraversalOrder::InOrder)).unwrap();
        append_report(&path, &obst, None).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Execution Time for n = 5 keys").count(), 2);
        assert_eq!(text.matches("Beginning Inorder Traversal").count(), 1);
    }
}
