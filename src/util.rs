use crate::error::ConfigError;

pub(crate) fn validate_buffer_size(buffer_size: usize) -> Result<(), ConfigError> {
    if !buffer_size.is_power_of_two() {
        return Err(ConfigError::BufferSizeNotPowerOfTwo(buffer_size));
    }
    if buffer_size < 8 {
        return Err(ConfigError::BufferTooSmall(buffer_size));
    }
    Ok(())
}

pub(crate) fn validate_sample_rate(sample_rate: f32) -> Result<(), ConfigError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(ConfigError::InvalidSampleRate(sample_rate));
    }
    Ok(())
}

pub(crate) fn validate_unit_interval(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidThreshold { name, value });
    }
    Ok(())
}

pub(crate) fn validate_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidParameter { name, value });
    }
    Ok(())
}
