use crate::LandmarkError;
use deli_base::log::error;
use deli_image::Image;
use futures_core::Stream;
use futures_sink::Sink;
use std::{
    collections::VecDeque,
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll, Waker},
};

use super::pipeline::LandmarkPipeline;
use super::types::{PoseLandmarks, Roi};

/// One unit of work: an image and the region to read landmarks from.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub image: Image,
    pub roi: Roi,
}

impl Frame {
    pub fn new(image: Image, roi: Roi) -> Self {
        Self { image, roi }
    }
}

/// Outcome for one frame: landmarks, no pose, or an error.
pub type FrameResult = Result<Option<PoseLandmarks>, LandmarkError>;

type Inflight = Pin<Box<dyn Future<Output = (Option<LandmarkPipeline>, FrameResult)> + Send>>;

/// Async driver for a [`LandmarkPipeline`].
///
/// Implements `Sink<Frame>` to accept frames and
/// `Stream<Item = FrameResult>` to produce one result per frame, in
/// submission order. Frames run one at a time on tokio's blocking pool.
///
/// Per-frame errors are yielded and processing continues with the next
/// frame. After a fatal error (see [`LandmarkError::is_fatal`]) the error is
/// yielded, queued frames are dropped and the stream ends. Closing the sink
/// ends the stream once queued frames are processed.
pub struct PoseLandmarker {
    pipeline: Option<LandmarkPipeline>,
    pending: VecDeque<Frame>,
    closed: bool,
    failed: bool,
    inflight: Option<Inflight>,
    stream_waker: Option<Waker>,
}

impl fmt::Debug for PoseLandmarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoseLandmarker")
            .field("pipeline", &self.pipeline)
            .field("pending", &self.pending.len())
            .field("closed", &self.closed)
            .field("failed", &self.failed)
            .field("inflight", &self.inflight.is_some())
            .finish()
    }
}

impl PoseLandmarker {
    pub fn new(pipeline: LandmarkPipeline) -> Self {
        Self {
            pipeline: Some(pipeline),
            pending: VecDeque::new(),
            closed: false,
            failed: false,
            inflight: None,
            stream_waker: None,
        }
    }

    /// Number of frames waiting behind the one in flight.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the pipeline into a blocking task for one frame; the task hands
    /// it back together with the result.
    fn start_frame(&mut self, frame: Frame) {
        let Some(mut pipeline) = self.pipeline.take() else {
            self.inflight = Some(Box::pin(async {
                (None, Err(LandmarkError::Runtime("landmark pipeline unavailable".to_string())))
            }));
            return;
        };

        self.inflight = Some(Box::pin(async move {
            let task = tokio::task::spawn_blocking(move || {
                let result = pipeline.process(&frame.image, &frame.roi);
                (pipeline, result)
            });
            match task.await {
                Ok((pipeline, result)) => (Some(pipeline), result),
                Err(e) => (
                    None,
                    Err(LandmarkError::Runtime(format!("landmark task failed: {e}"))),
                ),
            }
        }));
    }

    fn poll_inflight(&mut self, cx: &mut Context<'_>) -> Poll<Option<FrameResult>> {
        let Some(fut) = self.inflight.as_mut() else {
            return Poll::Ready(None);
        };
        match fut.as_mut().poll(cx) {
            Poll::Ready((pipeline, result)) => {
                self.inflight = None;
                self.pipeline = pipeline;
                if let Err(e) = &result {
                    if e.is_fatal() || self.pipeline.is_none() {
                        error!("pose landmarker stopping after fatal error: {}", e);
                        self.failed = true;
                        self.pending.clear();
                    }
                }
                Poll::Ready(Some(result))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Sink<Frame> for PoseLandmarker {
    type Error = LandmarkError;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), LandmarkError>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: Frame) -> Result<(), LandmarkError> {
        let this = self.get_mut();
        if this.failed {
            return Err(LandmarkError::Runtime(
                "pose landmarker stopped after a fatal error".to_string(),
            ));
        }
        this.pending.push_back(item);
        if let Some(waker) = this.stream_waker.take() {
            waker.wake();
        }
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), LandmarkError>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), LandmarkError>> {
        let this = self.get_mut();
        this.closed = true;
        if let Some(waker) = this.stream_waker.take() {
            waker.wake();
        }
        Poll::Ready(Ok(()))
    }
}

impl Stream for PoseLandmarker {
    type Item = FrameResult;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.inflight.is_some() {
            return this.poll_inflight(cx);
        }

        if this.failed {
            return Poll::Ready(None);
        }

        if let Some(frame) = this.pending.pop_front() {
            this.start_frame(frame);
            return this.poll_inflight(cx);
        }

        if this.closed {
            return Poll::Ready(None);
        }

        this.stream_waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

// PoseLandmarker must stay Send to be driven from spawned tasks
fn _assert_send() {
    fn assert<T: Send>() {}
    assert::<PoseLandmarker>();
}
