//! Background worker threads.

use std::{
    io,
    panic::resume_unwind,
    thread::{self, JoinHandle},
};

use crossbeam::channel::{self, Sender};

/// A builder object that can be used to configure and spawn a [`Worker`].
#[derive(Clone)]
pub struct WorkerBuilder {
    name: String,
    capacity: usize,
}

impl WorkerBuilder {
    /// Sets the name of the [`Worker`] thread.
    pub fn name<N: Into<String>>(self, name: N) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Sets the channel capacity of the [`Worker`].
    ///
    /// With the default capacity of 0, [`Worker::send`] blocks until the worker has picked the
    /// message up.
    pub fn capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    /// Spawns a [`Worker`] thread that invokes `handler` for every incoming message.
    pub fn spawn<I, F>(self, mut handler: F) -> io::Result<Worker<I>>
    where
        I: Send + 'static,
        F: FnMut(I) + Send + 'static,
    {
        let (sender, recv) = channel::bounded(self.capacity);
        let name = self.name;
        let handle = thread::Builder::new().name(name.clone()).spawn(move || {
            log::trace!("worker '{name}' starting");
            for message in recv {
                handler(message);
            }
            log::trace!("worker '{name}' exiting");
        })?;

        Ok(Worker {
            sender: Some(sender),
            handle: Some(handle),
        })
    }
}

/// A handle to a worker thread that processes messages of type `I`.
///
/// When dropped, the channel to the thread is closed and the thread joined. If the thread has
/// panicked, the panic is forwarded to the thread dropping the `Worker`.
pub struct Worker<I: Send + 'static> {
    sender: Option<Sender<I>>,
    handle: Option<JoinHandle<()>>,
}

impl Worker<()> {
    /// Returns a builder that can be used to configure and spawn a [`Worker`].
    #[inline]
    pub fn builder() -> WorkerBuilder {
        WorkerBuilder {
            name: "worker".into(),
            capacity: 0,
        }
    }
}

impl<I: Send + 'static> Worker<I> {
    /// Sends a message to the worker thread, blocking while the channel is full.
    ///
    /// If the worker has panicked, this propagates the panic to the calling thread.
    pub fn send(&mut self, msg: I) {
        if self.sender.as_ref().unwrap().send(msg).is_err() {
            // The worker exited before its channel was closed, so its handler panicked.
            self.join();
        }
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(payload) = handle.join() {
                if !thread::panicking() {
                    resume_unwind(payload);
                }
            }
        }
    }
}

impl<I: Send + 'static> Drop for Worker<I> {
    fn drop(&mut self) {
        // Close the channel to signal the thread to exit.
        drop(self.sender.take());

        self.join();
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    fn silent_panic(payload: String) {
        resume_unwind(Box::new(payload));
    }

    #[test]
    fn worker_propagates_panic_on_drop() {
        let mut worker = Worker::builder()
            .name("panicker")
            .spawn(|_: ()| silent_panic("worker panic".into()))
            .unwrap();
        worker.send(());
        catch_unwind(AssertUnwindSafe(|| drop(worker))).unwrap_err();
    }

    #[test]
    fn worker_propagates_panic_on_send() {
        let mut worker = Worker::builder()
            .spawn(|_| silent_panic("worker panic".into()))
            .unwrap();
        worker.send(());
        catch_unwind(AssertUnwindSafe(|| worker.send(()))).unwrap_err();
        catch_unwind(AssertUnwindSafe(|| drop(worker))).unwrap();
    }

    #[test]
    fn messages_are_processed_in_order() {
        let (out, results) = channel::unbounded();
        let mut worker = Worker::builder()
            .name("collector")
            .spawn(move |n: u32| out.send(n * 2).unwrap())
            .unwrap();
        for n in 0..4 {
            worker.send(n);
        }
        drop(worker);
        assert_eq!(results.iter().collect::<Vec<_>>(), [0, 2, 4, 6]);
    }
}
