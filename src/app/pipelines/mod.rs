pub mod speaker_pipeline;
