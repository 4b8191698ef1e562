//! Random program generation for property tests
//!
//! Programs have a small fixed vocabulary so every statement kind interacts
//! with every other one:
//! - `Base` declares `m(Object)` (stores into `this.f`, returns `this.f`)
//! - classes `C0..` extend `Base` or each other, some overriding `m`
//! - `C0` has a static initializer writing the static field `Base.g`
//! - static helpers `h0..` take and return one `Object`, and may call each
//!   other (recursion included)

use proptest::prelude::*;
use pta_engine::features::program::{
    CallKind, FieldId, MethodId, MethodRef, Program, ProgramBuilder, TypeId, VarId,
};

pub const CLASSES: usize = 4;
pub const HELPERS: usize = 3;
pub const VARS: usize = 4;

#[derive(Debug, Clone)]
pub enum Op {
    New { lhs: usize, class: usize },
    Copy { lhs: usize, rhs: usize },
    Cast { lhs: usize, rhs: usize, class: usize },
    Store { base: usize, rhs: usize },
    Load { lhs: usize, base: usize },
    StoreStatic { rhs: usize },
    LoadStatic { lhs: usize },
    StoreArray { rhs: usize },
    LoadArray { lhs: usize },
    Virtual { recv: usize, arg: usize, result: usize },
    Static { helper: usize, arg: usize, result: usize },
}

#[derive(Debug, Clone)]
pub struct ProgramShape {
    /// Superclass of `Ci` among `C0..Ci` (`None` = `Base`)
    pub supers: Vec<Option<usize>>,
    pub overrides: Vec<bool>,
    pub main: Vec<Op>,
    pub helpers: Vec<Vec<Op>>,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    let v = || 0..VARS;
    prop_oneof![
        (v(), 0..CLASSES).prop_map(|(lhs, class)| Op::New { lhs, class }),
        (v(), v()).prop_map(|(lhs, rhs)| Op::Copy { lhs, rhs }),
        (v(), v(), 0..CLASSES).prop_map(|(lhs, rhs, class)| Op::Cast { lhs, rhs, class }),
        (v(), v()).prop_map(|(base, rhs)| Op::Store { base, rhs }),
        (v(), v()).prop_map(|(lhs, base)| Op::Load { lhs, base }),
        v().prop_map(|rhs| Op::StoreStatic { rhs }),
        v().prop_map(|lhs| Op::LoadStatic { lhs }),
        v().prop_map(|rhs| Op::StoreArray { rhs }),
        v().prop_map(|lhs| Op::LoadArray { lhs }),
        (v(), v(), v()).prop_map(|(recv, arg, result)| Op::Virtual { recv, arg, result }),
        (0..HELPERS, v(), v()).prop_map(|(helper, arg, result)| Op::Static {
            helper,
            arg,
            result
        }),
    ]
}

pub fn shape_strategy() -> impl Strategy<Value = ProgramShape> {
    let supers: Vec<BoxedStrategy<Option<usize>>> = (0..CLASSES)
        .map(|i| {
            if i == 0 {
                Just(None).boxed()
            } else {
                proptest::option::of(0..i).boxed()
            }
        })
        .collect();
    (
        supers,
        proptest::collection::vec(any::<bool>(), CLASSES),
        proptest::collection::vec(op_strategy(), 1..16),
        proptest::collection::vec(proptest::collection::vec(op_strategy(), 0..8), HELPERS),
    )
        .prop_map(|(supers, overrides, main, helpers)| ProgramShape {
            supers,
            overrides,
            main,
            helpers,
        })
}

struct Vocabulary {
    base: TypeId,
    classes: Vec<TypeId>,
    main_cls: TypeId,
    f: FieldId,
    g: FieldId,
    /// Static `Object[]` field every array op goes through
    arr: FieldId,
    object_arr: TypeId,
}

/// Freeze a shape into a program with one `main`
pub fn build_program(shape: &ProgramShape) -> Program {
    let mut b = ProgramBuilder::new();
    let object = b.add_class("Object", None);
    let object_arr = b.array_of(object);
    let base = b.add_class("Base", Some(object));
    let f = b.add_field(base, "f", object, false);
    let g = b.add_field(base, "g", object, true);
    let arr = b.add_field(base, "arr", object_arr, true);

    let base_m = b.add_method(base, "m", "m(Object)", false);
    instance_body(&mut b, base_m, object, f);

    let mut classes = Vec::with_capacity(CLASSES);
    for i in 0..CLASSES {
        let superclass = shape.supers[i].map(|j| classes[j]).unwrap_or(base);
        let class = b.add_class(format!("C{}", i), Some(superclass));
        if shape.overrides[i] {
            let m = b.add_method(class, "m", "m(Object)", false);
            instance_body(&mut b, m, object, f);
        }
        classes.push(class);
    }

    let main_cls = b.add_class("Main", Some(object));
    let vocab = Vocabulary {
        base,
        classes,
        main_cls,
        f,
        g,
        arr,
        object_arr,
    };

    let init = b.add_initializer(vocab.classes[0]);
    let tmp = b.add_var(init, "tmp", object);
    b.new_obj(init, tmp, object);
    b.store_static(init, g, tmp);
    let array = b.add_var(init, "array", object_arr);
    b.new_array(init, array, object_arr, 1);
    b.store_static(init, arr, array);

    for (k, ops) in shape.helpers.iter().enumerate() {
        let helper = b.add_method(main_cls, format!("h{}", k), format!("h{}(Object)", k), true);
        let param = b.add_param(helper, "p", object);
        let mut vars = vec![param];
        for i in 1..VARS {
            vars.push(b.add_var(helper, format!("w{}", i), object));
        }
        emit(&mut b, helper, &vars, ops, &vocab);
        b.add_return(helper, vars[1]);
    }

    let main = b.add_method(main_cls, "main", "main()", true);
    let vars: Vec<VarId> = (0..VARS)
        .map(|i| b.add_var(main, format!("v{}", i), object))
        .collect();
    emit(&mut b, main, &vars, &shape.main, &vocab);
    b.add_main(main);

    b.build().expect("generated programs are well-formed")
}

/// `this.f = p; r = this.f; return r;`
fn instance_body(b: &mut ProgramBuilder, method: MethodId, object: TypeId, f: FieldId) {
    let this = b.this_of(method).expect("instance method");
    let p = b.add_param(method, "p", object);
    let r = b.add_var(method, "r", object);
    b.store_field(method, this, f, p);
    b.load_field(method, r, this, f);
    b.add_return(method, r);
}

fn emit(b: &mut ProgramBuilder, method: MethodId, vars: &[VarId], ops: &[Op], vocab: &Vocabulary) {
    for op in ops {
        match *op {
            Op::New { lhs, class } => {
                b.new_obj(method, vars[lhs], vocab.classes[class]);
            }
            Op::Copy { lhs, rhs } => b.copy(method, vars[lhs], vars[rhs]),
            Op::Cast { lhs, rhs, class } => {
                b.cast(method, vars[lhs], vars[rhs], vocab.classes[class])
            }
            Op::Store { base, rhs } => b.store_field(method, vars[base], vocab.f, vars[rhs]),
            Op::Load { lhs, base } => b.load_field(method, vars[lhs], vars[base], vocab.f),
            Op::StoreStatic { rhs } => b.store_static(method, vocab.g, vars[rhs]),
            Op::LoadStatic { lhs } => b.load_static(method, vars[lhs], vocab.g),
            Op::StoreArray { rhs } => {
                let array = b.add_var(method, "a", vocab.object_arr);
                b.load_static(method, array, vocab.arr);
                b.store_array(method, array, vars[rhs]);
            }
            Op::LoadArray { lhs } => {
                let array = b.add_var(method, "a", vocab.object_arr);
                b.load_static(method, array, vocab.arr);
                b.load_array(method, vars[lhs], array);
            }
            Op::Virtual { recv, arg, result } => {
                b.invoke(
                    method,
                    CallKind::Virtual,
                    MethodRef::new(vocab.base, "m(Object)"),
                    Some(vars[recv]),
                    vec![vars[arg]],
                    Some(vars[result]),
                );
            }
            Op::Static { helper, arg, result } => {
                b.invoke(
                    method,
                    CallKind::Static,
                    MethodRef::new(vocab.main_cls, format!("h{}(Object)", helper)),
                    None,
                    vec![vars[arg]],
                    Some(vars[result]),
                );
            }
        }
    }
}
