use std::str::SplitWhitespace;
use std::thread;
use std::time::Duration;

/// Word-by-word typing effect. Each item is a word followed by a space and
/// every item after the first waits `delay`; dropping the iterator stops
/// the output.
pub struct WordStream<'a> {
    words: SplitWhitespace<'a>,
    delay: Duration,
    emitted: bool,
}

pub fn stream_words(text: &str, delay: Duration) -> WordStream<'_> {
    WordStream {
        words: text.split_whitespace(),
        delay,
        emitted: false,
    }
}

impl Iterator for WordStream<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let word = self.words.next()?;
        if self.emitted && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.emitted = true;
        Some(format!("{word} "))
    }
}
