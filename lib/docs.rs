//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Grid conventions](#grid-conventions)
//! - [Quadrature](#quadrature)
//! - [Eigensolver](#eigensolver)
//!
//! # Background
//! The one-dimensional time-independent Schrödinger equation (TISE) for a
//! conservative potential *V*(*x*) reads, in units with *ħ* = 1,
//! ```text
//!    1   ∂²ψ
//! - --- ----- + V(x) ψ(x) = E ψ(x)
//!   2 m  ∂x²
//! ```
//! Sampling over a uniform grid and replacing the second derivative with the
//! 3-point stencil
//! ```text
//! ψ''(x[i]) ≈ (ψ[i-1] - 2 ψ[i] + ψ[i+1]) / Δ²
//! ```
//! turns the left-hand side into a real symmetric tridiagonal matrix with
//! ```text
//! H[i][i]   = 1/(m Δ²) + V[i]
//! H[i][i±1] = -1/(2 m Δ²)
//! ```
//! Wavefunctions implicitly vanish just outside the grid, so the
//! discretization carries hard-wall boundary conditions; eigenpairs of *H*
//! are the bound states resolvable on the grid.
//!
//! # Grid conventions
//! The coordinate array spans [*x*min, *x*max] inclusively with *n* points,
//! but the canonical spacing used by the kinetic stencil and all quadrature
//! is
//! ```text
//! Δ = (xmax - xmin) / n
//! ```
//! with an *n* divisor rather than the (*n* − 1) of the coordinate array
//! itself. Every published energy and tolerance downstream depends on this
//! value; it is computed exactly once, by
//! [`System::from_config`][crate::solve::System::from_config], and threaded
//! as a plain argument from there.
//!
//! # Quadrature
//! Normalization and position statistics use the interior rectangle rule
//! ```text
//! ∫ f dx ≈ Δ · Σ f[i],  i ∊ {1, ..., n - 2}
//! ```
//! The two boundary samples sit on the hard walls and carry no probability
//! weight. The same trim defines the interior coordinates used for ⟨x⟩ and
//! Δx, `xmin + Δ` through `xmax − Δ`.
//!
//! # Eigensolver
//! For a real symmetric tridiagonal matrix *T*, the number of negative
//! pivots of the LDLᵀ factorization of *T* − *x* 𝟙 equals the number of
//! eigenvalues below *x* (the Sturm count). The *k*-th smallest eigenvalue
//! is then the infimum of all *x* whose count exceeds *k*, located by
//! bisection inside the Gershgorin bounds of the spectrum — one search per
//! selected index, touching nothing outside the requested band.
//! Eigenvectors follow from inverse iteration: repeated solves of
//! (*T* − *λ* 𝟙) *v*' = *v* through a partially-pivoted tridiagonal LU
//! factorization, with re-orthogonalization across the band to keep
//! near-degenerate neighbors independent.
