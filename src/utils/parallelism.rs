//! Iterate in parallel if the `rayon` feature is enabled, sequentially otherwise.
//! Output order is the same in both cases.

#[cfg(feature = "rayon")]
mod inner {
    use rayon::prelude::*;

    pub trait MaybeParallelRefIterator<'data> {
        type Iter;

        fn maybe_par_iter(&'data self) -> Self::Iter;
    }

    impl<'data, I: 'data + ?Sized> MaybeParallelRefIterator<'data> for I
    where
        I: IntoParallelRefIterator<'data>,
    {
        type Iter = I::Iter;

        fn maybe_par_iter(&'data self) -> Self::Iter {
            self.par_iter()
        }
    }
}

#[cfg(not(feature = "rayon"))]
mod inner {
    pub trait MaybeParallelRefIterator<'data> {
        type Iter;

        fn maybe_par_iter(&'data self) -> Self::Iter;
    }

    impl<'data, I: 'data + ?Sized> MaybeParallelRefIterator<'data> for I
    where
        &'data I: IntoIterator,
    {
        type Iter = <&'data I as IntoIterator>::IntoIter;

        fn maybe_par_iter(&'data self) -> Self::Iter {
            self.into_iter()
        }
    }
}

pub use inner::*;
