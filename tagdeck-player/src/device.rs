//! Audio device sink using cpal.
//!
//! The engine's thread pushes frames into a lock-free ring; the cpal
//! callback drains it, substituting silence on underrun. `consume` reports
//! false when the ring is full, which is the real backpressure signal the
//! core's decode loop yields on.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use ringbuf::{traits::*, HeapProd, HeapRb};
use tagdeck_core::audio::AudioFrame;
use tagdeck_core::output::AudioSink;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};

/// Audio output device behind the gate.
pub struct DeviceSink {
    // field order drops the producer before the stream
    producer: HeapProd<f32>,
    _stream: Stream,
}

impl DeviceSink {
    /// List available output device names.
    pub fn list_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        let devices: Vec<String> = host
            .output_devices()
            .map_err(|e| Error::AudioOutput(format!("Failed to enumerate devices: {}", e)))?
            .filter_map(|device| device.name().ok())
            .collect();
        debug!("Found {} output devices", devices.len());
        Ok(devices)
    }

    /// Open the device and start the output stream.
    ///
    /// A named device that cannot be found falls back to the default
    /// device rather than failing.
    pub fn open(
        device_name: Option<&str>,
        sample_rate: u32,
        ring_frames: usize,
    ) -> Result<Self> {
        let host = cpal::default_host();

        let device = match device_name {
            Some(name) => {
                let mut devices = host.output_devices().map_err(|e| {
                    Error::AudioOutput(format!("Failed to enumerate devices: {}", e))
                })?;
                match devices.find(|d| d.name().ok().as_deref() == Some(name)) {
                    Some(dev) => {
                        info!("Found requested audio device: {}", name);
                        dev
                    }
                    None => {
                        warn!(
                            "Requested device '{}' not found, falling back to default device",
                            name
                        );
                        host.default_output_device().ok_or_else(|| {
                            Error::AudioOutput(format!(
                                "Device '{}' not found and no default device available",
                                name
                            ))
                        })?
                    }
                }
            }
            None => host
                .default_output_device()
                .ok_or_else(|| Error::AudioOutput("No default output device found".to_string()))?,
        };
        info!(
            "Using audio device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config = Self::get_best_config(&device, sample_rate)?;
        let channels = config.channels as usize;
        debug!(
            "Audio config: sample_rate={}, channels={}",
            config.sample_rate.0, channels
        );

        // stereo interleaved f32 ring between engine and callback
        let ring = HeapRb::<f32>::new(ring_frames * 2);
        let (producer, mut consumer) = ring.split();

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    for out in data.chunks_mut(channels) {
                        let left = consumer.try_pop().unwrap_or(0.0);
                        let right = consumer.try_pop().unwrap_or(left);
                        // underrun plays silence; no blocking in the callback
                        out[0] = left;
                        if channels > 1 {
                            out[1] = right;
                        }
                        for extra in out.iter_mut().skip(2) {
                            *extra = 0.0;
                        }
                    }
                },
                |e| error!("audio stream error: {}", e),
                None,
            )
            .map_err(|e| Error::AudioOutput(format!("Failed to build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| Error::AudioOutput(format!("Failed to start stream: {}", e)))?;

        Ok(Self {
            producer,
            _stream: stream,
        })
    }

    /// Pick a stereo f32 config at the requested rate, or fail.
    fn get_best_config(device: &Device, sample_rate: u32) -> Result<StreamConfig> {
        let supported = device
            .supported_output_configs()
            .map_err(|e| Error::AudioOutput(format!("Failed to get device configs: {}", e)))?;

        let preferred = supported.into_iter().find(|c| {
            c.channels() >= 2
                && c.min_sample_rate().0 <= sample_rate
                && c.max_sample_rate().0 >= sample_rate
                && c.sample_format() == SampleFormat::F32
        });
        if let Some(c) = preferred {
            return Ok(c.with_sample_rate(cpal::SampleRate(sample_rate)).config());
        }

        let default = device
            .default_output_config()
            .map_err(|e| Error::AudioOutput(format!("Failed to get default config: {}", e)))?;
        if default.sample_format() != SampleFormat::F32 {
            return Err(Error::AudioOutput(format!(
                "No f32 output config available (device offers {:?})",
                default.sample_format()
            )));
        }
        Ok(default.config())
    }
}

impl AudioSink for DeviceSink {
    fn consume(&mut self, frame: AudioFrame) -> bool {
        if self.producer.vacant_len() < 2 {
            return false;
        }
        let _ = self.producer.try_push(frame.left);
        let _ = self.producer.try_push(frame.right);
        self.producer.vacant_len() >= 2
    }
}
