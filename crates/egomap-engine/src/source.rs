//! Channel-fed localization.
//!
//! Odometry usually arrives on its own thread or interrupt handler at a
//! higher rate than the map ticks. [`ChannelSource`] is the receiving end
//! of that hand-off: producers push increments, and each tick sums
//! whatever has queued up since the previous one.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use egomap_core::{Displacement, LocalizationError, LocalizationSource};

/// [`LocalizationSource`] backed by a `crossbeam-channel` receiver.
///
/// # Examples
///
/// ```
/// use egomap_core::{Displacement, LocalizationSource};
/// use egomap_engine::ChannelSource;
///
/// let (tx, mut source) = ChannelSource::unbounded("odometry");
/// tx.send(Displacement::new(3.0, 0.0)).unwrap();
/// tx.send(Displacement::new(4.0, -1.0)).unwrap();
///
/// assert_eq!(source.displacement().unwrap(), Displacement::new(7.0, -1.0));
/// assert_eq!(source.displacement().unwrap(), Displacement::ZERO);
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    name: String,
    rx: Receiver<Displacement>,
}

impl ChannelSource {
    /// Wrap an existing receiver.
    pub fn new(name: impl Into<String>, rx: Receiver<Displacement>) -> Self {
        Self {
            name: name.into(),
            rx,
        }
    }

    /// Create an unbounded channel and return its sending half with the source.
    pub fn unbounded(name: impl Into<String>) -> (Sender<Displacement>, Self) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (tx, Self::new(name, rx))
    }

    /// Create a bounded channel. Producers block (or fail with `try_send`)
    /// once `capacity` increments are waiting.
    pub fn bounded(name: impl Into<String>, capacity: usize) -> (Sender<Displacement>, Self) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (tx, Self::new(name, rx))
    }
}

impl LocalizationSource for ChannelSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn displacement(&mut self) -> Result<Displacement, LocalizationError> {
        let mut total = Displacement::ZERO;
        let mut received = false;
        loop {
            match self.rx.try_recv() {
                Ok(d) => {
                    total = total + d;
                    received = true;
                }
                Err(TryRecvError::Empty) => return Ok(total),
                // Increments queued before the producer left still count.
                Err(TryRecvError::Disconnected) if received => return Ok(total),
                Err(TryRecvError::Disconnected) => return Err(LocalizationError::Disconnected),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn empty_queue_is_no_motion() {
        let (_tx, mut src) = ChannelSource::unbounded("odom");
        assert_eq!(src.displacement().unwrap(), Displacement::ZERO);
        assert_eq!(src.name(), "odom");
    }

    #[test]
    fn sums_everything_queued() {
        let (tx, mut src) = ChannelSource::bounded("odom", 16);
        for _ in 0..10 {
            tx.send(Displacement::new(-1.0, 0.5)).unwrap();
        }
        assert_eq!(src.displacement().unwrap(), Displacement::new(-10.0, 5.0));
        assert_eq!(src.displacement().unwrap(), Displacement::ZERO);
    }

    #[test]
    fn producer_thread_hand_off() {
        let (tx, mut src) = ChannelSource::unbounded("odom");
        let producer = thread::spawn(move || {
            for _ in 0..100 {
                tx.send(Displacement::new(0.25, 0.0)).unwrap();
            }
        });
        producer.join().unwrap();
        assert_eq!(src.displacement().unwrap(), Displacement::new(25.0, 0.0));
    }

    #[test]
    fn disconnect_drains_then_errors() {
        let (tx, mut src) = ChannelSource::unbounded("odom");
        tx.send(Displacement::new(2.0, 2.0)).unwrap();
        drop(tx);
        assert_eq!(src.displacement().unwrap(), Displacement::new(2.0, 2.0));
        assert_eq!(src.displacement(), Err(LocalizationError::Disconnected));
    }
}
