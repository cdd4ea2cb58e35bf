use core::mem::size_of;
use core::ptr;

/// A callable object accepting an argument tuple `A` and returning `R`.
///
/// This is implemented for every `FnMut` closure or function taking up to
/// eight arguments, with the arguments collected into a tuple.
pub trait Callable<A, R> {
    /// Invoke the callable with an argument tuple.
    fn call_with(&mut self, args: A) -> R;
}

macro_rules! impl_callable {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg),*> Callable<($($arg,)*), Ret> for Func
        where
            Func: FnMut($($arg),*) -> Ret,
        {
            #[inline]
            #[allow(non_snake_case)]
            fn call_with(&mut self, ($($arg,)*): ($($arg,)*)) -> Ret {
                self($($arg),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A1);
impl_callable!(A1, A2);
impl_callable!(A1, A2, A3);
impl_callable!(A1, A2, A3, A4);
impl_callable!(A1, A2, A3, A4, A5);
impl_callable!(A1, A2, A3, A4, A5, A6);
impl_callable!(A1, A2, A3, A4, A5, A6, A7);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8);

/// A lifecycle operation on a stored callable.
pub(crate) enum Op {
    /// Report the size of the callable type.
    Size,
    /// Clone the callable at `src` into the uninitialized slot at `dst`.
    Clone { src: *const u8, dst: *mut u8 },
    /// Drop the callable in place.
    Drop(*mut u8),
}

/// The dispatch table for a stored callable type.
pub(crate) struct Dispatch<A, R> {
    pub invoke: unsafe fn(*mut u8, A) -> R,
    pub manage: unsafe fn(Op) -> usize,
}

impl<A, R> Dispatch<A, R> {
    #[inline]
    pub fn new<F>() -> Self
    where
        F: Callable<A, R> + Clone + 'static,
    {
        Self {
            invoke: invoke::<F, A, R>,
            manage: manage::<F>,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        unsafe { (self.manage)(Op::Size) }
    }
}

impl<A, R> Clone for Dispatch<A, R> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, R> Copy for Dispatch<A, R> {}

unsafe fn invoke<F: Callable<A, R>, A, R>(data: *mut u8, args: A) -> R {
    (*data.cast::<F>()).call_with(args)
}

unsafe fn manage<F: Clone>(op: Op) -> usize {
    match op {
        Op::Size => size_of::<F>(),
        Op::Clone { src, dst } => {
            dst.cast::<F>().write((*src.cast::<F>()).clone());
            0
        }
        Op::Drop(data) => {
            ptr::drop_in_place(data.cast::<F>());
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use core::mem::{size_of, MaybeUninit};

    use super::{Callable, Dispatch, Op};

    fn call<F: Callable<A, R>, A, R>(mut f: F, args: A) -> R {
        f.call_with(args)
    }

    #[test]
    fn callable_arities() {
        assert_eq!(call(|| 1, ()), 1);
        assert_eq!(call(|a: i32| a + 1, (1,)), 2);
        assert_eq!(call(|a: i32, b: i32| a * b, (3, 4)), 12);
        assert_eq!(
            call(
                |a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8| a + b + c + d + e + f + g + h,
                (1, 2, 3, 4, 5, 6, 7, 8)
            ),
            36
        );
    }

    #[test]
    fn dispatch_table() {
        fn dispatch_for<F: Callable<A, R> + Clone + 'static, A, R>(_f: &F) -> Dispatch<A, R> {
            Dispatch::new::<F>()
        }

        let offset = 10u64;
        let f = move |a: u64| a + offset;
        let dispatch = dispatch_for::<_, (u64,), u64>(&f);
        assert_eq!(dispatch.size(), size_of::<u64>());

        let mut src = MaybeUninit::new(f);
        let mut dst = MaybeUninit::<u64>::uninit();
        unsafe {
            (dispatch.manage)(Op::Clone {
                src: src.as_ptr().cast(),
                dst: dst.as_mut_ptr().cast(),
            });
            assert_eq!((dispatch.invoke)(dst.as_mut_ptr().cast(), (5,)), 15);
            (dispatch.manage)(Op::Drop(src.as_mut_ptr().cast()));
            (dispatch.manage)(Op::Drop(dst.as_mut_ptr().cast()));
        }
    }
}
