//! Grouped fold over key-sorted rows.

use lexigraph_core::{Node, NodeSet};
use lexigraph_storage::StorageResult;

/// Folds `(key, node)` rows sorted by key into one `(key, node set)` per
/// distinct key.
///
/// A group is emitted when the key changes and once more after the last row,
/// so every emitted set holds at least one node. A read error is yielded
/// once and ends the iteration.
pub struct GroupedRows<I> {
    rows: I,
    current: Option<(String, NodeSet)>,
    rows_read: u64,
    done: bool,
}

impl<I> GroupedRows<I>
where
    I: Iterator<Item = StorageResult<(String, Node)>>,
{
    pub fn new(rows: I) -> Self {
        Self {
            rows,
            current: None,
            rows_read: 0,
            done: false,
        }
    }

    /// Source rows consumed so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl<I> Iterator for GroupedRows<I>
where
    I: Iterator<Item = StorageResult<(String, Node)>>,
{
    type Item = StorageResult<(String, NodeSet)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.rows.next() {
                Some(Ok((key, node))) => {
                    self.rows_read += 1;
                    let same_key = matches!(&self.current, Some((current, _)) if *current == key);
                    if same_key {
                        if let Some((_, nodes)) = self.current.as_mut() {
                            nodes.insert(node);
                        }
                        continue;
                    }
                    let mut nodes = NodeSet::new();
                    nodes.insert(node);
                    if let Some(finished) = self.current.replace((key, nodes)) {
                        return Some(Ok(finished));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return self.current.take().map(Ok);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigraph_storage::StorageError;

    fn rows(pairs: &[(&str, &str)]) -> Vec<StorageResult<(String, Node)>> {
        pairs
            .iter()
            .map(|(k, n)| Ok((k.to_string(), Node::new(*n))))
            .collect()
    }

    #[test]
    fn test_groups_by_key() {
        let input = rows(&[("dog", "<N1>"), ("dog", "<N2>"), ("house", "<N3>")]);
        let mut groups = GroupedRows::new(input.into_iter());
        let collected: Vec<(String, NodeSet)> =
            groups.by_ref().collect::<StorageResult<_>>().unwrap();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].0, "dog");
        assert_eq!(collected[0].1.len(), 2);
        assert_eq!(collected[1].0, "house");
        assert_eq!(groups.rows_read(), 3);
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let mut groups = GroupedRows::new(Vec::<StorageResult<(String, Node)>>::new().into_iter());
        assert!(groups.next().is_none());
    }

    #[test]
    fn test_single_row_emitted_at_end() {
        let mut groups = GroupedRows::new(rows(&[("cat", "<C>")]).into_iter());
        let (key, nodes) = groups.next().unwrap().unwrap();
        assert_eq!(key, "cat");
        assert_eq!(nodes.len(), 1);
        assert!(groups.next().is_none());
    }

    #[test]
    fn test_error_stops_iteration() {
        let mut input = rows(&[("a", "<A>")]);
        input.push(Err(StorageError::ReadFailed("boom".to_string())));
        input.extend(rows(&[("b", "<B>")]));
        let mut groups = GroupedRows::new(input.into_iter());
        assert!(groups.next().unwrap().is_err());
        assert!(groups.next().is_none());
    }
}
