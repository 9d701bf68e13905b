use filmrank::{Film, TopList};

fn film(title: &str, rating: f64, popularity: f64) -> Film {
    Film {
        title: title.into(),
        language: "en".into(),
        release_date: String::new(),
        rating,
        popularity,
    }
}

fn titles(list: &TopList) -> Vec<&str> {
    list.as_slice().iter().map(|f| f.title.as_str()).collect()
}

#[test]
fn keeps_best_k_sorted_by_rating() {
    let mut top = TopList::new(3);
    for (title, rating) in [("a", 5.0), ("b", 9.0), ("c", 7.0), ("d", 8.0), ("e", 6.0)] {
        top.insert(film(title, rating, 1.0));
    }
    assert_eq!(titles(&top), vec!["b", "d", "c"]);
}

#[test]
fn popularity_breaks_rating_ties() {
    let mut top = TopList::new(2);
    top.insert(film("low", 8.0, 1.0));
    top.insert(film("high", 8.0, 5.0));
    top.insert(film("mid", 8.0, 3.0));
    assert_eq!(titles(&top), vec!["high", "mid"]);
}

#[test]
fn negative_rating_is_rejected() {
    let mut top = TopList::new(2);
    top.insert(film("missing", -1.0, 99.0));
    assert!(top.is_empty());

    top.insert(film("real", 4.0, 1.0));
    top.insert(film("missing again", -0.5, 99.0));
    assert_eq!(titles(&top), vec!["real"]);
}

#[test]
fn zero_rating_is_a_valid_candidate() {
    // The permissive numeric parse turns garbage into 0.0, and 0.0 ranks.
    let mut top = TopList::new(2);
    top.insert(film("zero", 0.0, 1.0));
    assert_eq!(top.len(), 1);
}

#[test]
fn zero_capacity_stays_empty() {
    let mut top = TopList::new(0);
    top.insert(film("a", 9.9, 9.9));
    assert!(top.is_empty());
    assert_eq!(top.capacity(), 0);
}

#[test]
fn full_list_drops_candidates_that_beat_nothing() {
    let mut top = TopList::new(2);
    top.insert(film("first", 9.0, 1.0));
    top.insert(film("second", 8.0, 2.0));

    top.insert(film("worse", 7.0, 9.0));
    assert_eq!(titles(&top), vec!["first", "second"]);

    // Equal key beats nothing either.
    top.insert(film("equal", 8.0, 2.0));
    assert_eq!(titles(&top), vec!["first", "second"]);
}

#[test]
fn insertion_evicts_the_current_worst() {
    let mut top = TopList::new(3);
    top.insert(film("a", 9.0, 1.0));
    top.insert(film("b", 7.0, 1.0));
    top.insert(film("c", 5.0, 1.0));

    top.insert(film("d", 8.0, 1.0));
    assert_eq!(titles(&top), vec!["a", "d", "b"]);
}

#[test]
fn length_never_exceeds_capacity() {
    let mut top = TopList::new(4);
    for i in 0..50 {
        top.insert(film("x", f64::from(i), 0.0));
    }
    assert_eq!(top.len(), 4);
    assert_eq!(top.as_slice()[0].rating, 49.0);
}

#[test]
fn merge_selects_the_global_best() {
    let mut left = TopList::new(3);
    for (t, r) in [("l1", 9.0), ("l2", 4.0), ("l3", 3.0)] {
        left.insert(film(t, r, 1.0));
    }
    let mut right = TopList::new(3);
    for (t, r) in [("r1", 8.0), ("r2", 7.0), ("r3", 2.0)] {
        right.insert(film(t, r, 1.0));
    }

    let merged = TopList::merge_all([left, right], 3);
    assert_eq!(titles(&merged), vec!["l1", "r1", "r2"]);
}

#[test]
fn merge_handles_short_and_empty_lists() {
    let mut short = TopList::new(5);
    short.insert(film("only", 6.0, 1.0));

    let merged = TopList::merge_all([TopList::new(5), short, TopList::new(5)], 5);
    assert_eq!(titles(&merged), vec!["only"]);

    let none = TopList::merge_all(std::iter::empty(), 4);
    assert!(none.is_empty());
}

#[test]
fn merge_truncates_to_the_requested_capacity() {
    let mut a = TopList::new(4);
    let mut b = TopList::new(4);
    for i in 0..4 {
        a.insert(film("a", f64::from(i), 0.0));
        b.insert(film("b", f64::from(i) + 0.5, 0.0));
    }
    let merged = TopList::merge_all([a, b], 2);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.as_slice()[0].rating, 3.5);
    assert_eq!(merged.as_slice()[1].rating, 3.0);
}
