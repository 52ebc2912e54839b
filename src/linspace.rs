/// `n` evenly spaced values over `[min, max]`, inclusive of both ends.
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    /// A single sample is `min` alone and zero samples yield nothing; `max`
    /// only matters once `n >= 2`.
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            // Calculate the value just like numpy.linspace does
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    assert_eq!(Linspace::new(0., 1., 5).collect::<Vec<_>>(), vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(2., 2., 3).collect::<Vec<_>>(), vec![2., 2., 2.]);
    assert_eq!(Linspace::new(-1., 1., 1).collect::<Vec<_>>(), vec![-1.]);
    assert_eq!(Linspace::new(0., 1., 0).len(), 0);
}
