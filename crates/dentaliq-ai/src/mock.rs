//! Offline reply cycler.
//!
//! When no provider credential is configured the service answers from a
//! fixed list of canned replies, handed out in order and wrapping around.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Model id reported for replies produced by the cycler.
pub const MOCK_MODEL: &str = "mock";

const CANNED_REPLIES: [&str; 4] = [
    "For optimal dental health, I recommend brushing twice daily with a fluoride toothpaste, flossing once a day, and maintaining regular six-month check-up appointments. A diet low in sugary and acidic foods will also significantly benefit your oral health.",
    "Based on what you have shared, it would be best to schedule a follow-up appointment to properly assess this. In the meantime, avoid very hot or cold foods if you are experiencing sensitivity, and contact the clinic immediately if pain becomes severe.",
    "Great question! Sensitivity after a cleaning or whitening procedure is completely normal and typically resolves within 24-48 hours. Using a sensitivity toothpaste and avoiding extreme temperatures during this period will help manage any discomfort.",
    "Maintaining excellent home care is the most important thing you can do between visits. This means brushing for two full minutes twice a day, flossing daily, and using an antibacterial mouthwash if recommended by your dentist.",
];

/// Hands out canned replies round-robin.
///
/// The cursor is a single atomic counter, so concurrent callers each get a
/// distinct index and no increment is lost.
pub struct MockReplyCycler {
    replies: Vec<String>,
    cursor: AtomicUsize,
}

impl MockReplyCycler {
    /// Create a cycler over `replies`.
    ///
    /// # Panics
    ///
    /// Panics if `replies` is empty.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies: Vec<String> = replies.into_iter().map(Into::into).collect();
        assert!(!replies.is_empty(), "mock reply list must not be empty");
        Self {
            replies,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Return the next reply and advance the cursor.
    pub fn next_reply(&self) -> &str {
        // fetch_add wraps on overflow.
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.replies.len();
        &self.replies[idx]
    }

    /// Number of replies handed out so far.
    pub fn served(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }
}

impl Default for MockReplyCycler {
    fn default() -> Self {
        Self::with_replies(CANNED_REPLIES)
    }
}
