//! Pure segmentation of a time-sorted sequence into duration-aligned groups.
//! Unlike `aggregate`, this never combines values — it only decides which
//! items land in the same file.

/// One contiguous run of items sharing a bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    pub group_timestamp: i64,
    pub items: Vec<T>,
}

/// Segment `items` (sorted ascending by `timestamp_of`) into groups sharing
/// `floor(t / duration) * duration`. Empty input yields no groups.
pub fn bin<T, F>(items: &[T], duration: i64, timestamp_of: F) -> Vec<Group<T>>
where
    T: Clone,
    F: Fn(&T) -> i64,
{
    let mut groups: Vec<Group<T>> = Vec::new();
    for item in items {
        let t = timestamp_of(item);
        let group_timestamp = (t / duration) * duration;
        match groups.last_mut() {
            Some(g) if g.group_timestamp == group_timestamp => g.items.push(item.clone()),
            _ => groups.push(Group {
                group_timestamp,
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_groups() {
        let items: Vec<i64> = vec![];
        assert!(bin(&items, 100, |t| *t).is_empty());
    }

    #[test]
    fn groups_contiguous_runs() {
        let items = vec![0i64, 50, 99, 100, 150, 250];
        let groups = bin(&items, 100, |t| *t);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].group_timestamp, 0);
        assert_eq!(groups[0].items, vec![0, 50, 99]);
        assert_eq!(groups[1].group_timestamp, 100);
        assert_eq!(groups[1].items, vec![100, 150]);
        assert_eq!(groups[2].group_timestamp, 200);
        assert_eq!(groups[2].items, vec![250]);
    }
}
