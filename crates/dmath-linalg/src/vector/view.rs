//! Named-field access to the elements of 2 to 4 dimensional vectors.

use std::ops::{Deref, DerefMut};

use crate::Vector;

macro_rules! field_views {
    ($($view:ident for $n:literal => $($field:ident),+;)+) => {
        $(
            #[doc = concat!("Field view of a [`Vector`] with ", $n, " elements.")]
            #[repr(C)]
            pub struct $view<T> {
                $(pub $field: T,)+
                _sealed: (),
            }

            impl<T> Deref for Vector<T, $n> {
                type Target = $view<T>;

                #[inline]
                fn deref(&self) -> &$view<T> {
                    // Safety: `$view<T>` is `repr(C)` with `$n` fields of type `T` and a trailing
                    // zero-sized field, which is the layout of the `[T; $n]` inside `Vector`.
                    unsafe { &*(self as *const Self).cast::<$view<T>>() }
                }
            }

            impl<T> DerefMut for Vector<T, $n> {
                #[inline]
                fn deref_mut(&mut self) -> &mut $view<T> {
                    // Safety: see `deref`.
                    unsafe { &mut *(self as *mut Self).cast::<$view<T>>() }
                }
            }
        )+
    };
}

field_views! {
    XY for 2 => x, y;
    XYZ for 3 => x, y, z;
    XYZW for 4 => x, y, z, w;
}
