//=========================================================================
// Animation Action
//=========================================================================
//
// One playable clip plus its playback controls.
//
// Weight model:
//   fade_in(d)   weight 0 → 1 over d seconds
//   fade_out(d)  weight w → 0 over d seconds, then stop()
//
// Clip time advances only while playing. Looping clips wrap at their
// duration, one-shot clips clamp on their last frame.
//
//=========================================================================

//=== ClipAsset ===========================================================

/// A decoded animation clip as delivered by the asset loader.
///
/// `speed` overrides the nominal locomotion speed of the action; when
/// absent the catalog uses the default for well-known action names.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipAsset {
    pub name: String,
    pub duration: f32,
    pub looping: bool,
    pub speed: Option<f32>,
}

impl ClipAsset {
    /// Creates a looping clip with the default speed for its name.
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            looping: true,
            speed: None,
        }
    }

    /// Marks the clip as one-shot (clamps on its last frame).
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    /// Overrides the nominal locomotion speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Clip set for the extended character (idle, walk, run, jump, pose).
    pub fn standard_set() -> Vec<ClipAsset> {
        vec![
            ClipAsset::new("idle", 2.0),
            ClipAsset::new("walk", 1.0),
            ClipAsset::new("run", 0.7),
            ClipAsset::new("jump", 1.1).once(),
            ClipAsset::new("pose", 3.0),
        ]
    }
}

//=== AnimationClip =======================================================

/// Immutable clip data referenced by an action.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub looping: bool,
}

//=== Fade ================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Fade {
    fn weight(&self) -> f32 {
        let t = (self.elapsed / self.duration).min(1.0);
        self.from + (self.to - self.from) * t
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

//=== AnimationAction =====================================================

/// A playable clip with weight, time and fade state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationAction {
    clip: AnimationClip,
    speed: f32,
    time: f32,
    weight: f32,
    playing: bool,
    fade: Option<Fade>,
}

impl AnimationAction {
    //--- Construction -----------------------------------------------------

    /// Creates a stopped action with zero weight.
    pub fn new(clip: AnimationClip, speed: f32) -> Self {
        Self {
            clip,
            speed,
            time: 0.0,
            weight: 0.0,
            playing: false,
            fade: None,
        }
    }

    //--- Playback Controls ------------------------------------------------

    /// Starts advancing clip time. Weight is left as is.
    pub fn play(&mut self) -> &mut Self {
        self.playing = true;
        self
    }

    /// Stops playback, cancels any fade and rewinds.
    pub fn stop(&mut self) -> &mut Self {
        self.playing = false;
        self.weight = 0.0;
        self.time = 0.0;
        self.fade = None;
        self
    }

    /// Rewinds to the first frame and cancels any fade.
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.fade = None;
        self
    }

    /// Sets the weight directly, cancelling any fade.
    pub fn set_weight(&mut self, weight: f32) -> &mut Self {
        self.weight = weight.clamp(0.0, 1.0);
        self.fade = None;
        self
    }

    /// Ramps weight from zero to one over `duration` seconds.
    pub fn fade_in(&mut self, duration: f32) -> &mut Self {
        self.schedule_fade(0.0, 1.0, duration)
    }

    /// Ramps weight from its current value to zero over `duration`
    /// seconds, then stops.
    pub fn fade_out(&mut self, duration: f32) -> &mut Self {
        let from = self.weight;
        self.schedule_fade(from, 0.0, duration)
    }

    fn schedule_fade(&mut self, from: f32, to: f32, duration: f32) -> &mut Self {
        if duration <= 0.0 {
            self.fade = None;
            if to == 0.0 {
                return self.stop();
            }
            self.weight = to;
            return self;
        }

        self.weight = from;
        self.fade = Some(Fade { from, to, duration, elapsed: 0.0 });
        self
    }

    //--- Time Advance -----------------------------------------------------

    /// Advances clip time and any running fade by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        self.time += dt;
        if self.clip.duration > 0.0 {
            if self.clip.looping {
                self.time = self.time.rem_euclid(self.clip.duration);
            } else {
                self.time = self.time.min(self.clip.duration);
            }
        } else {
            self.time = 0.0;
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            self.weight = fade.weight();

            if fade.is_complete() {
                let faded_out = fade.to == 0.0;
                self.fade = None;
                if faded_out {
                    self.stop();
                }
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.clip.name
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Nominal locomotion speed associated with this action.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current clip time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current blend weight in `[0, 1]`.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn action(duration: f32, looping: bool) -> AnimationAction {
        AnimationAction::new(
            AnimationClip { name: "walk".to_string(), duration, looping },
            1.0,
        )
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    //=== Playback ========================================================

    #[test]
    fn new_action_is_stopped() {
        let a = action(1.0, true);
        assert!(!a.is_playing());
        assert_eq!(a.weight(), 0.0);
        assert_eq!(a.time(), 0.0);
    }

    #[test]
    fn stopped_action_does_not_advance() {
        let mut a = action(1.0, true);
        a.advance(0.5);
        assert_eq!(a.time(), 0.0);
    }

    #[test]
    fn looping_clip_wraps() {
        let mut a = action(1.0, true);
        a.set_weight(1.0).play();
        a.advance(0.75);
        a.advance(0.5);
        assert!(approx(a.time(), 0.25));
    }

    #[test]
    fn one_shot_clip_clamps() {
        let mut a = action(1.0, false);
        a.set_weight(1.0).play();
        a.advance(0.75);
        a.advance(0.75);
        assert_eq!(a.time(), 1.0);
        assert!(a.is_playing());
    }

    #[test]
    fn reset_rewinds_without_stopping() {
        let mut a = action(1.0, true);
        a.set_weight(1.0).play();
        a.advance(0.4);
        a.reset();
        assert_eq!(a.time(), 0.0);
        assert!(a.is_playing());
        assert_eq!(a.weight(), 1.0);
    }

    //=== Fades ===========================================================

    #[test]
    fn fade_in_ramps_to_full_weight() {
        let mut a = action(1.0, true);
        a.fade_in(0.25).play();
        assert_eq!(a.weight(), 0.0);

        a.advance(0.125);
        assert!(approx(a.weight(), 0.5));
        assert!(a.is_fading());

        a.advance(0.125);
        assert!(approx(a.weight(), 1.0));
        assert!(!a.is_fading());
    }

    #[test]
    fn fade_out_stops_at_zero_weight() {
        let mut a = action(1.0, true);
        a.set_weight(1.0).play();
        a.fade_out(0.5);

        a.advance(0.25);
        assert!(approx(a.weight(), 0.5));
        assert!(a.is_playing(), "Keeps playing while fading out");

        a.advance(0.25);
        assert_eq!(a.weight(), 0.0);
        assert!(!a.is_playing());
    }

    #[test]
    fn fade_out_starts_from_current_weight() {
        let mut a = action(1.0, true);
        a.fade_in(1.0).play();
        a.advance(0.4);

        a.fade_out(0.4);
        assert!(approx(a.weight(), 0.4));
        a.advance(0.2);
        assert!(approx(a.weight(), 0.2));
    }

    #[test]
    fn zero_duration_fades_apply_immediately() {
        let mut a = action(1.0, true);
        a.fade_in(0.0).play();
        assert_eq!(a.weight(), 1.0);

        a.fade_out(0.0);
        assert!(!a.is_playing());
        assert_eq!(a.weight(), 0.0);
    }

    //=== ClipAsset =======================================================

    #[test]
    fn standard_set_has_five_clips_with_one_shot_jump() {
        let set = ClipAsset::standard_set();
        assert_eq!(set.len(), 5);
        let jump = set.iter().find(|c| c.name == "jump").map(|c| c.looping);
        assert_eq!(jump, Some(false));
    }
}
