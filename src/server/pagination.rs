use serde::Deserialize;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N`, 1-indexed, defaults to the first page.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

/// Page 0 has nothing on it, same as a page past the end.
pub fn paginate<T: Clone>(items: &[T], page: u32) -> Vec<T> {
    let Some(skip) = (page as usize).checked_sub(1) else {
        return Vec::new();
    };
    items
        .iter()
        .skip(skip.saturating_mul(QUESTIONS_PER_PAGE))
        .take(QUESTIONS_PER_PAGE)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_holds_first_ten() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 1), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_is_partial() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 3), vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (0..25).collect();
        assert!(paginate(&items, 4).is_empty());
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate(&items, u32::MAX).is_empty());
    }

    #[test]
    fn page_defaults_to_one() {
        let pagination: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(pagination.page, 1);
    }
}
