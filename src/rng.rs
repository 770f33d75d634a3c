use rand::prelude::*;

use crate::config::TargetDraw;
use crate::types::ClockTime;

/// Uniform target: hour in 1..=12, minute on one of the twelve 5-minute ticks.
pub fn random_time<R: Rng + ?Sized>(rng: &mut R) -> ClockTime {
    let hour = rng.gen_range(1..=12u8);
    let minute = rng.gen_range(0..12u8) * 5;
    ClockTime::new(hour, minute).unwrap_or_default()
}

/// Batch of pre-drawn targets consumed from the back.
#[derive(Clone, Debug, Default)]
pub struct TaskPool {
    tasks: Vec<ClockTime>,
    batch_size: usize,
    refills: u32,
}

impl TaskPool {
    pub fn new(batch_size: usize) -> Self {
        Self { tasks: Vec::with_capacity(batch_size), batch_size, refills: 0 }
    }

    pub fn len(&self) -> usize { self.tasks.len() }
    pub fn is_empty(&self) -> bool { self.tasks.is_empty() }
    pub fn refills(&self) -> u32 { self.refills }

    pub fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tasks.clear();
        self.tasks.extend((0..self.batch_size).map(|_| random_time(rng)));
        self.refills += 1;
        log::debug!("task pool refilled with {} targets", self.batch_size);
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ClockTime {
        if self.tasks.is_empty() {
            self.refill(rng);
        }
        // batch_size is validated non-zero, the default only guards an empty pool
        self.tasks.pop().unwrap_or_default()
    }
}

/// Where the next round's target comes from.
#[derive(Clone, Debug)]
pub enum TargetSource {
    Pool(TaskPool),
    Direct,
}

impl TargetSource {
    pub fn new(draw: TargetDraw, pool_size: usize) -> Self {
        match draw {
            TargetDraw::Pool => TargetSource::Pool(TaskPool::new(pool_size)),
            TargetDraw::Direct => TargetSource::Direct,
        }
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ClockTime {
        match self {
            TargetSource::Pool(pool) => pool.draw(rng),
            TargetSource::Direct => random_time(rng),
        }
    }
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_times_cover_the_dial() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut hours = [false; 13];
        let mut minutes = [false; 12];
        for _ in 0..2000 {
            let t = random_time(&mut rng);
            hours[t.hour() as usize] = true;
            minutes[(t.minute() / 5) as usize] = true;
        }
        assert!(!hours[0]);
        assert!(hours[1..].iter().all(|&h| h));
        assert!(minutes.iter().all(|&m| m));
    }

    #[test]
    fn empty_pool_refills_one_batch_before_drawing() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut pool = TaskPool::new(4);
        assert!(pool.is_empty());
        let first = pool.draw(&mut rng);
        assert!((1..=12).contains(&first.hour()) && first.minute() % 5 == 0);
        assert_eq!(pool.refills(), 1);
        assert_eq!(pool.len(), 3);
        for _ in 0..3 { pool.draw(&mut rng); }
        assert!(pool.is_empty());
        assert_eq!(pool.refills(), 1);
        pool.draw(&mut rng);
        assert_eq!(pool.refills(), 2);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = TargetSource::new(TargetDraw::Pool, 10);
        let mut b = TargetSource::new(TargetDraw::Pool, 10);
        let mut ra = seeded_rng(Some(42));
        let mut rb = seeded_rng(Some(42));
        for _ in 0..25 {
            assert_eq!(a.next(&mut ra), b.next(&mut rb));
        }
    }
}
