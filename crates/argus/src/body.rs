//! Replayable HTTP body handles.
//!
//! Verification has to read a body that someone downstream still expects to
//! consume, so the body handle is drained exactly once and an in-memory
//! buffer over the same bytes is reinstalled before the verifier returns —
//! on error paths too.

use std::fmt;
use std::io::{self, Cursor, Read};

use bytes::Bytes;

/// The HTTP request type verified by this crate.
pub type Request = http::Request<Body>;

/// The HTTP response type verified by this crate.
pub type Response = http::Response<Body>;

/// A request or response body that can be drained once and replayed.
///
/// A `Body` is either absent, an in-memory buffer, or a streaming reader.
/// After [`drain`](Body::drain) the handle is always an in-memory buffer
/// rewound to the start, so downstream consumers observe the original
/// stream.
///
/// # Example
///
/// ```rust
/// use argus::Body;
/// use std::io::Read;
///
/// let mut body = Body::from("{\"id\":1}");
/// let bytes = body.drain().unwrap();
/// assert_eq!(&bytes[..], b"{\"id\":1}");
///
/// // The handle replays the same content afterwards.
/// let mut replay = String::new();
/// body.read_to_string(&mut replay).unwrap();
/// assert_eq!(replay, "{\"id\":1}");
/// ```
#[derive(Default)]
pub struct Body {
    inner: Inner,
}

#[derive(Default)]
enum Inner {
    #[default]
    Empty,
    Buffered(Cursor<Bytes>),
    Stream(Box<dyn Read + Send>),
}

impl Body {
    /// Creates an absent body.
    #[must_use]
    pub fn empty() -> Self {
        Self { inner: Inner::Empty }
    }

    /// Creates a body over in-memory bytes.
    #[must_use]
    pub fn buffered(bytes: impl Into<Bytes>) -> Self {
        Self {
            inner: Inner::Buffered(Cursor::new(bytes.into())),
        }
    }

    /// Creates a body draining a streaming reader.
    #[must_use]
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            inner: Inner::Stream(Box::new(reader)),
        }
    }

    /// Drains the body into memory and reinstalls a rewound in-memory buffer
    /// over the same bytes.
    ///
    /// An absent body yields an empty slice. An already-buffered body is
    /// rewound and yields its full content, regardless of how much of it was
    /// read in the meantime. When the underlying reader fails mid-drain, the
    /// bytes read so far are still reinstalled before the error is returned.
    pub fn drain(&mut self) -> io::Result<Bytes> {
        match &mut self.inner {
            Inner::Empty => Ok(Bytes::new()),
            Inner::Buffered(cursor) => {
                cursor.set_position(0);
                Ok(cursor.get_ref().clone())
            }
            Inner::Stream(reader) => {
                let mut buffer = Vec::new();
                let result = reader.read_to_end(&mut buffer);
                let bytes = Bytes::from(buffer);
                self.inner = Inner::Buffered(Cursor::new(bytes.clone()));
                result.map(|_| bytes)
            }
        }
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Empty => Ok(0),
            Inner::Buffered(cursor) => cursor.read(buf),
            Inner::Stream(reader) => reader.read(buf),
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Empty => f.write_str("Body::Empty"),
            Inner::Buffered(cursor) => f
                .debug_tuple("Body::Buffered")
                .field(&cursor.get_ref().len())
                .finish(),
            Inner::Stream(_) => f.write_str("Body::Stream"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::buffered(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::buffered(bytes)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::buffered(text.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::buffered(Bytes::copy_from_slice(text.as_bytes()))
    }
}
