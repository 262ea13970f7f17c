//! Frame driver - the fixed-delay redraw loop.
//!
//! The original widgets re-invalidated themselves from inside their own draw
//! call, which ties the animation's lifetime to the rendering surface
//! implicitly. Here the loop is an explicit repeating task: starting it
//! returns a [`FrameTicket`], and canceling (or dropping) the ticket stops
//! the loop before the next tick fires. That makes the cancellation contract
//! testable without any rendering surface at all.
//!
//! ## Rust Lesson #14: Send + 'static Closures
//!
//! The frame callback moves onto a worker thread, so the compiler requires
//! it to be `Send` (safe to move across threads) and `'static` (owns its
//! captures). State driven by the callback form is therefore owned by the
//! callback itself; hosts that keep ownership poll the channel form instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Delay between frames: 18ms, roughly 55 fps.
pub const FRAME_DELAY: Duration = Duration::from_millis(18);

/// Spawns fixed-delay frame loops.
pub struct FrameDriver;

/// Handle to a running frame loop.
///
/// The loop stops when the callback returns `false`, when [`cancel`] is
/// called, or when the ticket is dropped. `cancel` joins the worker, so no
/// tick can fire after it returns.
///
/// [`cancel`]: FrameTicket::cancel
#[derive(Debug)]
pub struct FrameTicket {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FrameDriver {
    /// Start a frame loop invoking `on_frame` every `delay`.
    ///
    /// The callback returns whether to keep going - the gauge returns
    /// `false` on entering its full state; the field always returns `true`.
    pub fn spawn<F>(delay: Duration, mut on_frame: F) -> FrameTicket
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let handle = thread::spawn(move || loop {
            thread::sleep(delay);
            if flag.load(Ordering::SeqCst) {
                break;
            }
            if !on_frame() {
                break;
            }
        });
        FrameTicket { cancelled, handle: Some(handle) }
    }

    /// Start a frame loop that delivers tick timestamps over a channel.
    ///
    /// For hosts that poll from their own event loop rather than handing
    /// state to the worker. The loop ends when the receiver is dropped or
    /// the ticket is canceled.
    pub fn channel(delay: Duration) -> (FrameTicket, Receiver<Instant>) {
        let (tx, rx) = mpsc::channel();
        let ticket = Self::spawn(delay, move || tx.send(Instant::now()).is_ok());
        (ticket, rx)
    }
}

impl FrameTicket {
    /// Stop the loop and wait for the worker to finish.
    ///
    /// After this returns the callback is guaranteed not to run again.
    /// Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Whether the loop has been told to stop.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for FrameTicket {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc::RecvTimeoutError;

    const TEST_DELAY: Duration = Duration::from_millis(2);

    #[test]
    fn ticks_arrive_on_the_channel() {
        let (mut ticket, rx) = FrameDriver::channel(TEST_DELAY);
        for _ in 0..3 {
            rx.recv_timeout(Duration::from_secs(1)).expect("tick should arrive");
        }
        ticket.cancel();
    }

    #[test]
    fn cancel_stops_the_loop() {
        let (mut ticket, rx) = FrameDriver::channel(TEST_DELAY);
        rx.recv_timeout(Duration::from_secs(1)).expect("tick should arrive");

        ticket.cancel();
        assert!(ticket.is_cancelled());

        // Drain anything sent before the cancel landed, then verify silence.
        while rx.try_recv().is_ok() {}
        assert_eq!(
            rx.recv_timeout(Duration::from_millis(50)),
            Err(RecvTimeoutError::Disconnected)
        );
    }

    #[test]
    fn callback_false_stops_scheduling() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut ticket = FrameDriver::spawn(TEST_DELAY, move || {
            seen.fetch_add(1, Ordering::SeqCst) + 1 < 5
        });

        // Give the loop time to hit its limit, then confirm it stays there.
        thread::sleep(Duration::from_millis(100));
        assert_eq!(count.load(Ordering::SeqCst), 5);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), 5);
        ticket.cancel();
    }

    #[test]
    fn dropping_the_ticket_cancels() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        {
            let _ticket = FrameDriver::spawn(TEST_DELAY, move || {
                seen.fetch_add(1, Ordering::SeqCst);
                true
            });
            thread::sleep(Duration::from_millis(20));
        }
        // Ticket dropped: the join inside Drop means the worker is gone.
        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn cancel_is_idempotent() {
        let (mut ticket, _rx) = FrameDriver::channel(TEST_DELAY);
        ticket.cancel();
        ticket.cancel();
        assert!(ticket.is_cancelled());
    }
}
