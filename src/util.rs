pub mod iterators {

    pub mod cyclic {

        /// Iteration over a rotation list starting at an arbitrary position.
        pub trait CyclicIterable<T> {
            /// Visits every element once, starting at 'offset'. With 'wrap' the
            /// element at 'offset' is visited a second time at the end.
            fn cycle(&self, offset: usize, wrap: bool) -> CyclicIterator<T>;
        }

        pub struct CyclicIterator<'a, T> {
            inner: &'a [T],
            left_pos: isize,
            right_pos: isize,
            offset: isize,
        }

        impl<'a, T> Iterator for CyclicIterator<'a, T> {
            type Item = &'a T;

            fn next(&mut self) -> Option<Self::Item> {
                if self.left_pos > self.right_pos {
                    None
                } else {
                    let p = self.left_pos;
                    self.left_pos += 1;
                    Some(&self.inner[((p + self.offset) % self.inner.len() as isize) as usize])
                }
            }
        }

        impl<'a, T> DoubleEndedIterator for CyclicIterator<'a, T> {
            fn next_back(&mut self) -> Option<Self::Item> {
                if self.left_pos > self.right_pos {
                    None
                } else {
                    let p = self.right_pos;
                    self.right_pos -= 1;
                    Some(&self.inner[((p + self.offset) % self.inner.len() as isize) as usize])
                }
            }
        }

        impl<T> CyclicIterable<T> for [T] {
            fn cycle(&self, start: usize, wrap: bool) -> CyclicIterator<T> {
                if self.is_empty() {
                    return CyclicIterator {
                        inner: self,
                        left_pos: 0,
                        right_pos: -1,
                        offset: 0,
                    };
                }
                CyclicIterator {
                    inner: self,
                    left_pos: 0,
                    right_pos: if !wrap {
                        (self.len() - 1) as isize
                    } else {
                        self.len() as isize
                    },
                    offset: (start % self.len()) as isize,
                }
            }
        }

        #[cfg(test)]
        mod tests {
            use super::CyclicIterable;

            #[test]
            fn test_cycle() {
                let v = vec![1, 2, 3, 4];
                let seen: Vec<i32> = v.cycle(2, false).copied().collect();
                assert_eq!(seen, vec![3, 4, 1, 2]);
                let seen: Vec<i32> = v.cycle(3, true).copied().collect();
                assert_eq!(seen, vec![4, 1, 2, 3, 4]);
                let back: Vec<i32> = v.cycle(1, false).rev().copied().collect();
                assert_eq!(back, vec![1, 4, 3, 2]);
                let empty: Vec<i32> = Vec::new();
                assert_eq!(empty.cycle(0, true).count(), 0);
            }
        }
    }
}
