//! MP4 output: ffmpeg encoding, source decoding and the two video layouts.

pub mod combined;
pub mod encode;
pub mod source;
pub mod vector_video;
