//! Hand-written program fixtures

use pta_engine::features::program::{
    AllocSiteId, CallKind, CallSiteId, FieldId, MethodId, MethodRef, Program, ProgramBuilder,
    TypeId, VarId,
};

/// ```text
/// abstract class A { abstract void foo(); }
/// class C extends A { void foo() {} }
/// class D extends A { void foo() {} }
/// static void main() { A o = flag ? new C() : new D(); o.foo(); }
/// ```
pub struct PolymorphicCall {
    pub program: Program,
    pub o: VarId,
    pub alloc_c: AllocSiteId,
    pub alloc_d: AllocSiteId,
    pub call: CallSiteId,
    pub c_foo: MethodId,
    pub d_foo: MethodId,
}

pub fn polymorphic_call() -> PolymorphicCall {
    let mut b = ProgramBuilder::new();
    let object = b.add_class("Object", None);
    let a = b.add_class("A", Some(object));
    let c = b.add_class("C", Some(a));
    let d = b.add_class("D", Some(a));
    let a_foo = b.add_method(a, "foo", "foo()", false);
    b.set_abstract(a_foo);
    let c_foo = b.add_method(c, "foo", "foo()", false);
    let d_foo = b.add_method(d, "foo", "foo()", false);

    let main_cls = b.add_class("Main", Some(object));
    let main = b.add_method(main_cls, "main", "main()", true);
    let o = b.add_var(main, "o", a);
    let alloc_c = b.new_obj(main, o, c);
    let alloc_d = b.new_obj(main, o, d);
    let call = b.invoke(main, CallKind::Virtual, MethodRef::new(a, "foo()"), Some(o), vec![], None);
    b.add_main(main);

    PolymorphicCall {
        program: b.build().expect("valid fixture"),
        o,
        alloc_c,
        alloc_d,
        call,
        c_foo,
        d_foo,
    }
}

/// ```text
/// class Holder {
///     Object f;
///     void set(Object v) { this.f = v; }
///     Object get() { return this.f; }
/// }
/// static void main() {
///     Holder h1 = new Holder(); Holder h2 = new Holder();
///     Object x1 = new Object(); Object x2 = new Object();
///     h1.set(x1); h2.set(x2);
///     Object r1 = h1.get(); Object r2 = h2.get();
/// }
/// ```
pub struct TwoReceivers {
    pub program: Program,
    pub set: MethodId,
    pub get: MethodId,
    pub f: FieldId,
    pub alloc_h1: AllocSiteId,
    pub alloc_h2: AllocSiteId,
    pub alloc_x1: AllocSiteId,
    pub alloc_x2: AllocSiteId,
    pub r1: VarId,
    pub r2: VarId,
}

pub fn two_receivers() -> TwoReceivers {
    let mut b = ProgramBuilder::new();
    let object = b.add_class("Object", None);
    let holder = b.add_class("Holder", Some(object));
    let f = b.add_field(holder, "f", object, false);

    let set = b.add_method(holder, "set", "set(Object)", false);
    let set_this = this_of(&b, set);
    let v = b.add_param(set, "v", object);
    b.store_field(set, set_this, f, v);

    let get = b.add_method(holder, "get", "get()", false);
    let get_this = this_of(&b, get);
    let ret = b.add_var(get, "ret", object);
    b.load_field(get, ret, get_this, f);
    b.add_return(get, ret);

    let main_cls = b.add_class("Main", Some(object));
    let main = b.add_method(main_cls, "main", "main()", true);
    let h1 = b.add_var(main, "h1", holder);
    let h2 = b.add_var(main, "h2", holder);
    let x1 = b.add_var(main, "x1", object);
    let x2 = b.add_var(main, "x2", object);
    let r1 = b.add_var(main, "r1", object);
    let r2 = b.add_var(main, "r2", object);
    let alloc_h1 = b.new_obj(main, h1, holder);
    let alloc_h2 = b.new_obj(main, h2, holder);
    let alloc_x1 = b.new_obj(main, x1, object);
    let alloc_x2 = b.new_obj(main, x2, object);
    let set_ref = MethodRef::new(holder, "set(Object)");
    let get_ref = MethodRef::new(holder, "get()");
    b.invoke(main, CallKind::Virtual, set_ref.clone(), Some(h1), vec![x1], None);
    b.invoke(main, CallKind::Virtual, set_ref, Some(h2), vec![x2], None);
    b.invoke(main, CallKind::Virtual, get_ref.clone(), Some(h1), vec![], Some(r1));
    b.invoke(main, CallKind::Virtual, get_ref, Some(h2), vec![], Some(r2));
    b.add_main(main);

    TwoReceivers {
        program: b.build().expect("valid fixture"),
        set,
        get,
        f,
        alloc_h1,
        alloc_h2,
        alloc_x1,
        alloc_x2,
        r1,
        r2,
    }
}

/// ```text
/// class Base { static Object s; static { s = new Object(); } }
/// class Derived extends Base { static Derived self; static { self = new Derived(); } }
/// static void main() { Object d = new Derived(); }
/// ```
pub struct InitializerChain {
    pub program: Program,
    pub base: TypeId,
    pub derived: TypeId,
    pub base_init: MethodId,
    pub derived_init: MethodId,
}

pub fn initializer_chain() -> InitializerChain {
    let mut b = ProgramBuilder::new();
    let object = b.add_class("Object", None);
    let base = b.add_class("Base", Some(object));
    let derived = b.add_class("Derived", Some(base));
    let s = b.add_field(base, "s", object, true);
    let this_field = b.add_field(derived, "self", derived, true);

    let base_init = b.add_initializer(base);
    let tmp = b.add_var(base_init, "tmp", object);
    b.new_obj(base_init, tmp, object);
    b.store_static(base_init, s, tmp);

    // allocating its own class inside the initializer must not re-trigger it
    let derived_init = b.add_initializer(derived);
    let inst = b.add_var(derived_init, "inst", derived);
    b.new_obj(derived_init, inst, derived);
    b.store_static(derived_init, this_field, inst);

    let main_cls = b.add_class("Main", Some(object));
    let main = b.add_method(main_cls, "main", "main()", true);
    let d = b.add_var(main, "d", object);
    b.new_obj(main, d, derived);
    b.add_main(main);

    InitializerChain {
        program: b.build().expect("valid fixture"),
        base,
        derived,
        base_init,
        derived_init,
    }
}

/// ```text
/// static void main() {
///     Object[] a = new String[1];
///     a[0] = new Object();
///     a[1] = new String();
///     Object r = a[0];
/// }
/// ```
pub struct CovariantArray {
    pub program: Program,
    pub r: VarId,
    pub alloc_array: AllocSiteId,
    pub alloc_object: AllocSiteId,
    pub alloc_string: AllocSiteId,
}

pub fn covariant_array() -> CovariantArray {
    let mut b = ProgramBuilder::new();
    let object = b.add_class("Object", None);
    let string = b.add_class("String", Some(object));
    let object_arr = b.array_of(object);
    let string_arr = b.array_of(string);

    let main_cls = b.add_class("Main", Some(object));
    let main = b.add_method(main_cls, "main", "main()", true);
    let a = b.add_var(main, "a", object_arr);
    let o = b.add_var(main, "o", object);
    let s = b.add_var(main, "s", string);
    let r = b.add_var(main, "r", object);
    let alloc_array = b.new_array(main, a, string_arr, 1);
    let alloc_object = b.new_obj(main, o, object);
    b.store_array(main, a, o);
    let alloc_string = b.new_obj(main, s, string);
    b.store_array(main, a, s);
    b.load_array(main, r, a);
    b.add_main(main);

    CovariantArray {
        program: b.build().expect("valid fixture"),
        r,
        alloc_array,
        alloc_object,
        alloc_string,
    }
}

/// `this` variable of an instance method still under construction
pub fn this_of(b: &ProgramBuilder, method: MethodId) -> VarId {
    b.this_of(method).expect("instance method")
}
