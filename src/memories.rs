use chrono::NaiveDate;

/// A captioned set of photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    pub id: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    /// Paths relative to the memories directory.
    pub images: &'static [&'static str],
    /// `YYYY-MM-DD`.
    pub date: &'static str,
}

impl Memory {
    /// `"January 15, 2024"`, or the raw string if it is not a valid date.
    pub fn display_date(&self) -> String {
        NaiveDate::parse_from_str(self.date, "%Y-%m-%d")
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|_| self.date.to_string())
    }
}

const MEMORIES: [Memory; 3] = [
    Memory {
        id: "1",
        title: "Our First Date",
        message: "Remember that magical evening when we first met? The way you smiled lit up the entire room. Every moment with you feels like the beginning of forever. 💕✨",
        images: &["date1.jpg", "date2.jpg", "date3.jpg"],
        date: "2024-01-15",
    },
    Memory {
        id: "2",
        title: "Beach Day Adventure",
        message: "That perfect day at the beach, watching the sunset together. Your laughter is my favorite melody, and your smile is my sunrise. 🌅🏖️",
        images: &["beach1.jpg", "beach2.jpg"],
        date: "2024-02-20",
    },
    Memory {
        id: "3",
        title: "Our Special Moments",
        message: "From quiet evenings to adventures together, every second with you is a treasure. You're my everything! 💫❤️",
        images: &["special1.jpg", "special2.jpg", "special3.jpg"],
        date: "2024-03-10",
    },
];

pub fn memories() -> &'static [Memory] {
    &MEMORIES
}

/// Cursor over a list of memories and the photos inside the current one.
///
/// Moving past either end wraps around. Changing memory starts again at its
/// first photo. Advancing on a timer is left to whoever drives the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slideshow<'a> {
    memories: &'a [Memory],
    memory: usize,
    image: usize,
}

impl<'a> Slideshow<'a> {
    pub fn new(memories: &'a [Memory]) -> Self {
        Slideshow { memories, memory: 0, image: 0 }
    }

    /// Starts at `index`, wrapped into range.
    pub fn at(memories: &'a [Memory], index: usize) -> Self {
        let memory = if memories.is_empty() { 0 } else { index % memories.len() };
        Slideshow { memories, memory, image: 0 }
    }

    pub fn current(&self) -> Option<&'a Memory> {
        self.memories.get(self.memory)
    }

    pub fn current_image(&self) -> Option<&'a str> {
        self.current().and_then(|m| m.images.get(self.image).copied())
    }

    pub fn memory_index(&self) -> usize {
        self.memory
    }

    pub fn image_index(&self) -> usize {
        self.image
    }

    pub fn next_image(&mut self) {
        let count = self.current().map_or(0, |m| m.images.len());
        if count > 0 {
            self.image = (self.image + 1) % count;
        }
    }

    pub fn prev_image(&mut self) {
        let count = self.current().map_or(0, |m| m.images.len());
        if count > 0 {
            self.image = (self.image + count - 1) % count;
        }
    }

    pub fn next_memory(&mut self) {
        if !self.memories.is_empty() {
            self.memory = (self.memory + 1) % self.memories.len();
            self.image = 0;
        }
    }

    pub fn prev_memory(&mut self) {
        let count = self.memories.len();
        if count > 0 {
            self.memory = (self.memory + count - 1) % count;
            self.image = 0;
        }
    }
}
