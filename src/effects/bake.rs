use crate::foundation::error::{BoothError, BoothResult};
use crate::session::shot::{BakedShots, EncodedImage, Shot, ShotList};

/// Re-render one shot with its filter permanently applied.
///
/// The result is always PNG and keeps the shot's tag and dimensions.
pub fn bake_shot(shot: &Shot) -> BoothResult<Shot> {
    let mut decoded = shot.src.decode()?;
    shot.filter.apply(&mut decoded.rgba, decoded.size)?;
    let src = EncodedImage::encode_png(&decoded.rgba, decoded.size)?;
    Ok(Shot {
        src,
        filter: shot.filter,
    })
}

/// Bake every shot of a complete list, in capture order.
///
/// The first failure aborts the run and is reported with the index of the failing shot; there is
/// no fallback to unfiltered output.
#[tracing::instrument(skip(list), fields(count = list.len()))]
pub fn bake_shots(list: &ShotList) -> BoothResult<BakedShots> {
    if !list.is_complete() {
        return Err(BoothError::validation(format!(
            "cannot bake an incomplete strip ({} of {} shots)",
            list.len(),
            list.target()
        )));
    }

    let mut baked = Vec::with_capacity(list.len());
    for (index, shot) in list.shots().iter().enumerate() {
        let out = bake_shot(shot).map_err(|e| {
            tracing::warn!(index, error = %e, "bake failed");
            BoothError::bake(index, e)
        })?;
        tracing::debug!(index, filter = %shot.filter, "baked shot");
        baked.push(out);
    }

    BakedShots::new(list.target(), baked)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/bake.rs"]
mod tests;
